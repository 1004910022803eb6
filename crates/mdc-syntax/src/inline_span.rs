//! Bracketed inline spans: `[text]`.
//!
//! A span declines when the closing bracket is followed by `(` or `[`, so
//! links keep priority.

use mdc_engine::{Error, InlineRule, InlineState, Nesting};

use crate::kinds;

/// Tag of span tokens.
pub const SPAN_TAG: &str = "span";

/// Inline rule for bracketed spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSpanRule;

impl InlineRule for InlineSpanRule {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        if state.byte_at(start) != Some(b'[') {
            return Ok(false);
        }

        let Some(end) = span_end(state, start) else {
            return Ok(false);
        };
        if matches!(state.byte_at(end + 1), Some(b'(' | b'[')) {
            return Ok(false);
        }

        if !silent {
            state.push(kinds::INLINE_SPAN, SPAN_TAG, Nesting::Open);
            let md = state.md;
            md.inline.tokenize_range_of(state, start + 1, end)?;
            state.push(kinds::INLINE_SPAN, SPAN_TAG, Nesting::Close);
        }

        state.pos = end + 1;
        Ok(true)
    }
}

/// Offset of the `]` matching the `[` at `start`.
///
/// Nested brackets must balance and a backslash skips the next byte.
fn span_end(state: &InlineState<'_>, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start + 1;
    while let Some(b) = state.byte_at(pos) {
        match b {
            b'\\' => {
                pos += 2;
                continue;
            }
            b'[' => depth += 1,
            b']' if depth == 0 => return Some(pos),
            b']' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use mdc_engine::{HtmlRenderer, Nesting, Token};
    use pretty_assertions::assert_eq;

    use crate::tests::parse;

    fn inline_children(src: &str) -> Vec<Token> {
        parse(src)[1].children.clone().unwrap()
    }

    fn summary(tokens: &[Token]) -> Vec<(&str, usize)> {
        tokens.iter().map(|t| (t.kind.as_str(), t.level)).collect()
    }

    #[test]
    fn test_span_with_inline_markup() {
        let children = inline_children("a [*b* `c`] d");
        assert_eq!(
            summary(&children),
            vec![
                ("text", 0),
                ("mdc_inline_span", 0),
                ("em_open", 1),
                ("text", 2),
                ("em_close", 1),
                ("text", 1),
                ("code_inline", 1),
                ("mdc_inline_span", 0),
                ("text", 0),
            ]
        );
        assert_eq!(children[1].nesting, Nesting::Open);
        assert_eq!(children[1].tag, "span");
    }

    #[test]
    fn test_nested_spans() {
        let html = HtmlRenderer::new().render(&parse("[a [b] c]"));
        assert_eq!(html, "<p><span>a <span>b</span> c</span></p>\n");
    }

    #[test]
    fn test_escaped_bracket() {
        let html = HtmlRenderer::new().render(&parse(r"[a \] b]"));
        assert_eq!(html, "<p><span>a ] b</span></p>\n");
    }

    #[test]
    fn test_links_keep_priority() {
        let children = inline_children("[text](https://example.com)");
        assert_eq!(children[0].kind, "link_open");

        let children = inline_children("[text][ref]");
        assert_eq!(children[0].kind, "text");
        assert_eq!(children[0].content, "[text]");
    }

    #[test]
    fn test_unterminated_is_text() {
        let children = inline_children("[open and *em*");
        assert_eq!(children[0].kind, "text");
        assert_eq!(children[0].content, "[open and ");
        assert!(children.iter().all(|t| t.kind != "mdc_inline_span"));
    }

    #[test]
    fn test_component_inside_span() {
        let children = inline_children("[:icon label]");
        assert_eq!(children[1].kind, "mdc_inline_component");
        assert_eq!(children[1].tag, "icon");
    }
}
