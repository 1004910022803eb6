//! Parser entry point.

use crate::block::{BlockParser, BlockState};
use crate::inline::InlineParser;
use crate::lines::normalize;
use crate::token::Token;
use crate::{Env, Error};

/// Default recursion ceiling for both tokenizers.
pub const DEFAULT_MAX_NESTING: usize = 100;

/// Parser-wide limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum depth of re-entrant block or inline tokenization.
    pub max_nesting: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

/// Extension that registers rules on a parser.
pub trait Plugin {
    /// Register rules on `md`.
    fn install(&self, md: &mut MarkdownParser) -> Result<(), Error>;
}

/// Markdown parser: block and inline rule chains plus options.
///
/// # Example
///
/// ```
/// use mdc_engine::MarkdownParser;
///
/// let md = MarkdownParser::new();
/// let tokens = md.parse("# Title\n\nSome *text*.\n").unwrap();
/// assert_eq!(tokens[0].kind, "heading_open");
/// ```
#[derive(Default)]
pub struct MarkdownParser {
    pub block: BlockParser,
    pub inline: InlineParser,
    pub options: ParserOptions,
}

impl MarkdownParser {
    /// Create a parser with the built-in rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the built-in rule set and custom limits.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Install a plugin.
    pub fn use_plugin(&mut self, plugin: &impl Plugin) -> Result<&mut Self, Error> {
        plugin.install(self)?;
        Ok(self)
    }

    /// Tokenize a document.
    pub fn parse(&self, src: &str) -> Result<Vec<Token>, Error> {
        let mut env = Env::new();
        self.parse_with_env(src, &mut env)
    }

    /// Tokenize a document with caller-provided scratch storage.
    pub fn parse_with_env(&self, src: &str, env: &mut Env) -> Result<Vec<Token>, Error> {
        let src = normalize(src);

        let mut state = BlockState::new(&src, self, env);
        let end = state.line_count();
        self.block.tokenize(&mut state, 0, end)?;
        let mut tokens = state.into_tokens();

        for token in tokens.iter_mut().filter(|t| t.kind == "inline") {
            let children = token.children.get_or_insert_with(Vec::new);
            self.inline.parse(&token.content, self, children)?;
        }

        tracing::trace!(lines = end, tokens = tokens.len(), "parsed document");
        Ok(tokens)
    }
}
