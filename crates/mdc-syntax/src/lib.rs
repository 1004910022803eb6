//! Markdown component syntax for `mdc-engine`.
//!
//! Adds these constructs to a [`MarkdownParser`]:
//!
//! | Syntax | Rule | Tokens |
//! |--------|------|--------|
//! | `::name{props}` ... `::` | [`ContainerRule`] | `mdc_block_open` / `mdc_block_close` |
//! | `:name[content]{props}` | [`ShorthandRule`] | `mdc_block_shorthand` |
//! | `---` YAML `---` as the first block of a container | [`FrontMatterRule`] | attributes of the container |
//! | `#name{props}` inside a container | [`SlotRule`] | `mdc_block_slot` (`<template #name>`) |
//! | `:name` / `:name[content]` in text | [`InlineComponentRule`] | `mdc_inline_component` |
//! | `[text]` not followed by `(` or `[` | [`InlineSpanRule`] | `mdc_inline_span` |
//!
//! # Quick Start
//!
//! ```
//! use mdc_engine::{HtmlRenderer, ParserOptions};
//! use mdc_syntax::{MdcOptions, parser};
//!
//! let md = parser(ParserOptions::default(), MdcOptions::default()).unwrap();
//! let tokens = md.parse("::alert{.warning}\nMind the **gap**.\n::\n").unwrap();
//! let html = HtmlRenderer::new().render(&tokens);
//! assert_eq!(html, "<alert class=\"warning\">Mind the <strong>gap</strong>.</alert>\n");
//! ```
//!
//! # Failure policy
//!
//! Fragments that don't parse make their rule decline, and the line falls
//! through to ordinary markdown. The one exception is the shorthand block:
//! its parse failures propagate as [`Error::Rule`]. The shorthand only
//! triggers on `:` followed by a letter, so prose such as `:30 past` stays
//! a paragraph.

mod brackets;
mod container;
mod error;
mod fence;
mod front_matter;
mod inline_component;
mod inline_span;
mod params;
mod props;
mod shorthand;
mod slot;
mod stack;

use mdc_engine::block::chains::{BLOCKQUOTE, LIST, PARAGRAPH, REFERENCE};
use mdc_engine::{Error, MarkdownParser, ParserOptions, Plugin};

pub use brackets::{Bracket, parse_bracket_content};
pub use container::ContainerRule;
pub use error::SyntaxError;
pub use front_matter::{FrontMatterError, FrontMatterRule, parse_front_matter};
pub use inline_component::InlineComponentRule;
pub use inline_span::{InlineSpanRule, SPAN_TAG};
pub use params::{BlockParams, kebab_case, parse_block_params};
pub use props::{CLASS_KEY, ID_KEY, Props, search_props};
pub use shorthand::ShorthandRule;
pub use slot::{SLOT_TAG, SlotRule};

/// Marker character of containers, shorthand blocks and inline components.
pub const MARKER: char = ':';

/// Default minimum marker run that opens a container.
pub const MIN_MARKERS: usize = 2;

/// Names under which the rules are registered.
pub mod rules {
    pub const CONTAINER: &str = "mdc_block";
    pub const SHORTHAND: &str = "mdc_block_shorthand";
    pub const FRONT_MATTER: &str = "mdc_block_yaml";
    pub const SLOTS: &str = "mdc_block_slots";
    pub const INLINE_COMPONENT: &str = "mdc_inline_component";
    pub const INLINE_SPAN: &str = "mdc_inline_span";
}

/// Token kinds emitted by the rules.
pub mod kinds {
    pub const CONTAINER_OPEN: &str = "mdc_block_open";
    pub const CONTAINER_CLOSE: &str = "mdc_block_close";
    pub const SHORTHAND: &str = "mdc_block_shorthand";
    pub const SLOT: &str = "mdc_block_slot";
    pub const INLINE_COMPONENT: &str = "mdc_inline_component";
    pub const INLINE_SPAN: &str = "mdc_inline_span";
}

/// Which constructs to register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MdcOptions {
    pub containers: bool,
    pub shorthand: bool,
    /// Only takes effect together with `containers`.
    pub front_matter: bool,
    /// Only takes effect together with `containers`.
    pub slots: bool,
    pub inline_components: bool,
    pub inline_spans: bool,
    /// Shortest colon run that opens a container.
    pub min_markers: usize,
}

impl Default for MdcOptions {
    fn default() -> Self {
        Self {
            containers: true,
            shorthand: true,
            front_matter: true,
            slots: true,
            inline_components: true,
            inline_spans: true,
            min_markers: MIN_MARKERS,
        }
    }
}

/// Plugin that registers the component rules.
///
/// Block rules end up ordered `code`, `mdc_block_slots`, `mdc_block_yaml`,
/// `mdc_block_shorthand`, `mdc_block`, `fence`; containers may interrupt
/// paragraphs, references, blockquotes and lists. `mdc_inline_span` runs
/// before `link` and `mdc_inline_component` after `entity`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mdc {
    options: MdcOptions,
}

impl Mdc {
    #[must_use]
    pub fn new(options: MdcOptions) -> Self {
        Self { options }
    }
}

impl Plugin for Mdc {
    fn install(&self, md: &mut MarkdownParser) -> Result<(), Error> {
        let options = &self.options;
        let block = &mut md.block.ruler;

        if options.shorthand {
            block.insert_before("fence", rules::SHORTHAND, Box::new(ShorthandRule), &[])?;
        }
        if options.containers {
            block.insert_before(
                "fence",
                rules::CONTAINER,
                Box::new(ContainerRule::new(options.min_markers)),
                &[PARAGRAPH, REFERENCE, BLOCKQUOTE, LIST],
            )?;
        }
        if options.front_matter {
            block.insert_after("code", rules::FRONT_MATTER, Box::new(FrontMatterRule), &[])?;
        }
        if options.slots {
            block.insert_after(
                "code",
                rules::SLOTS,
                Box::new(SlotRule::new(options.min_markers)),
                &[],
            )?;
        }

        let inline = &mut md.inline.ruler;
        if options.inline_spans {
            inline.insert_before("link", rules::INLINE_SPAN, Box::new(InlineSpanRule), &[])?;
        }
        if options.inline_components {
            inline.insert_after(
                "entity",
                rules::INLINE_COMPONENT,
                Box::new(InlineComponentRule),
                &[],
            )?;
        }

        tracing::debug!(?options, "component syntax installed");
        Ok(())
    }
}

/// Build a parser with the built-in rules plus the component syntax.
pub fn parser(parser_options: ParserOptions, options: MdcOptions) -> Result<MarkdownParser, Error> {
    let mut md = MarkdownParser::with_options(parser_options);
    md.use_plugin(&Mdc::new(options))?;
    Ok(md)
}

#[cfg(test)]
pub(crate) mod tests {
    use mdc_engine::{MarkdownParser, ParserOptions, Token};
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) fn parser() -> MarkdownParser {
        super::parser(ParserOptions::default(), MdcOptions::default()).unwrap()
    }

    pub(crate) fn parse(src: &str) -> Vec<Token> {
        parser().parse(src).unwrap()
    }

    pub(crate) fn kinds_of(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.kind.as_str()).collect()
    }

    #[test]
    fn test_rule_order() {
        let md = parser();
        let block: Vec<_> = md.block.ruler.names().collect();
        assert_eq!(
            block,
            vec![
                "code",
                "mdc_block_slots",
                "mdc_block_yaml",
                "mdc_block_shorthand",
                "mdc_block",
                "fence",
                "hr",
                "heading",
                "paragraph",
            ]
        );

        let inline: Vec<_> = md.inline.ruler.names().collect();
        assert_eq!(
            inline,
            vec![
                "text",
                "newline",
                "escape",
                "backticks",
                "emphasis",
                "mdc_inline_span",
                "link",
                "entity",
                "mdc_inline_component",
            ]
        );
    }

    #[test]
    fn test_container_interrupts_every_chain() {
        let md = parser();
        for chain in [PARAGRAPH, REFERENCE, BLOCKQUOTE, LIST] {
            let names: Vec<_> = md.block.ruler.chain(chain).map(|(name, _)| name).collect();
            assert!(names.contains(&rules::CONTAINER), "{chain}");
            assert!(!names.contains(&rules::SHORTHAND), "{chain}");
        }
    }

    #[test]
    fn test_disabled_features_are_not_registered() {
        let options = MdcOptions {
            containers: false,
            inline_spans: false,
            ..MdcOptions::default()
        };
        let md = super::parser(ParserOptions::default(), options).unwrap();
        assert!(md.block.ruler.names().all(|n| n != rules::CONTAINER));
        assert!(md.inline.ruler.names().all(|n| n != rules::INLINE_SPAN));

        let tokens = md.parse("::alert\n[x]\n::\n").unwrap();
        assert_eq!(kinds_of(&tokens), vec!["paragraph_open", "inline", "paragraph_close"]);
    }

    #[test]
    fn test_min_markers() {
        let options = MdcOptions {
            min_markers: 3,
            ..MdcOptions::default()
        };
        let md = super::parser(ParserOptions::default(), options).unwrap();
        let tokens = md.parse("::alert\n::\n").unwrap();
        assert_eq!(tokens[0].kind, "paragraph_open");

        let tokens = md.parse(":::alert\n:::\n").unwrap();
        assert_eq!(tokens[0].kind, "mdc_block_open");
    }

    #[test]
    fn test_deep_nesting_hits_the_limit() {
        let src = "::::::a\n:::::b\n::::c\n:::d\n::e\nx\n";
        assert!(parse(src).len() > 10);

        let md = super::parser(ParserOptions { max_nesting: 3 }, MdcOptions::default()).unwrap();
        let err = md.parse(src).unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { limit: 3 }));
    }

    #[test]
    fn test_mixed_document() {
        let src = "\
# Guide

::card{.wide}
---
title: Setup
---
#header
Install :icon{name=\"gear\"} [now]

#default
Run it.
::
";
        let html = mdc_engine::HtmlRenderer::new().render(&parse(src));
        assert_eq!(
            html,
            "<h1>Guide</h1>\n\
             <card class=\"wide\" title=\"Setup\">\n\
             <template #header=\"\">\n\
             <p>Install <icon></icon>{name=&quot;gear&quot;} <span>now</span></p>\n\
             </template>\n\
             <template #default=\"\">\n\
             <p>Run it.</p>\n\
             </template>\n\
             </card>\n"
        );
    }
}
