//! Inline components: `:name` and `:name[content]`.

use mdc_engine::{Error, InlineRule, InlineState, Nesting};

use crate::{MARKER, kinds, parse_bracket_content};

/// Characters allowed right before the marker.
const ALLOWED_PREV: [char; 6] = [' ', '\t', '\n', '*', '_', '['];

/// Inline rule for components embedded in text.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineComponentRule;

impl InlineRule for InlineComponentRule {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        if state.byte_at(start).map(char::from) != Some(MARKER) {
            return Ok(false);
        }
        if start > 0
            && !state
                .char_before(start)
                .is_some_and(|c| ALLOWED_PREV.contains(&c))
        {
            return Ok(false);
        }

        let name_start = start + 1;
        let mut name_end = name_start;
        while state.byte_at(name_end).is_some_and(is_name_byte) {
            name_end += 1;
        }
        if name_end == name_start {
            return Ok(false);
        }

        let src = state.src;
        let mut end = name_end;
        let mut content = None;
        if state.byte_at(name_end) == Some(b'[')
            && let Ok(bracket) = parse_bracket_content(&src[..state.pos_max], name_end)
        {
            content = Some(bracket.content);
            end = bracket.end_index;
        }

        if !silent {
            let name = &src[name_start..name_end];
            if let Some(content) = content {
                state.push(kinds::INLINE_COMPONENT, name, Nesting::Open);
                state.push("text", "", Nesting::SelfClosing).content = content.to_owned();
                state.push(kinds::INLINE_COMPONENT, name, Nesting::Close);
            } else {
                state.push(kinds::INLINE_COMPONENT, name, Nesting::SelfClosing);
            }
        }

        state.pos = end;
        Ok(true)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'-')
}

#[cfg(test)]
mod tests {
    use mdc_engine::{HtmlRenderer, Nesting, Token};
    use pretty_assertions::assert_eq;

    use crate::tests::parse;

    fn inline_children(src: &str) -> Vec<Token> {
        let tokens = parse(src);
        tokens[1].children.clone().unwrap()
    }

    #[test]
    fn test_with_content() {
        let children = inline_children("Press :kbd[Ctrl] now");
        let summary: Vec<_> = children
            .iter()
            .map(|t| (t.kind.as_str(), t.tag.as_str(), t.content.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("text", "", "Press "),
                ("mdc_inline_component", "kbd", ""),
                ("text", "", "Ctrl"),
                ("mdc_inline_component", "kbd", ""),
                ("text", "", " now"),
            ]
        );
        assert_eq!(children[1].nesting, Nesting::Open);
        assert_eq!(children[3].nesting, Nesting::Close);
    }

    #[test]
    fn test_self_closing_keeps_raw_name() {
        let children = inline_children("An :Icon-Star$ here");
        assert_eq!(children[1].tag, "Icon-Star$");
        assert_eq!(children[1].nesting, Nesting::SelfClosing);
        assert_eq!(children[2].content, " here");
    }

    #[test]
    fn test_needs_allowed_previous_character() {
        let children = inline_children("see http://x and a:b");
        assert!(children.iter().all(|t| t.kind == "text"));
    }

    #[test]
    fn test_after_emphasis_marker_and_bracket() {
        let children = inline_children("*:star*");
        assert!(children.iter().any(|t| t.tag == "star"));

        let children = inline_children("x [:star] y");
        assert!(children.iter().any(|t| t.tag == "star"));
    }

    #[test]
    fn test_empty_name_is_text() {
        let children = inline_children("a : b :[x]");
        assert!(children.iter().all(|t| t.kind != "mdc_inline_component"));
    }

    #[test]
    fn test_unterminated_bracket_is_left_as_text() {
        let children = inline_children("an :icon[open");
        assert_eq!(children[1].tag, "icon");
        assert_eq!(children[1].nesting, Nesting::SelfClosing);
        let rest: String = children[2..].iter().map(|t| t.content.as_str()).collect();
        assert_eq!(rest, "[open");
    }

    #[test]
    fn test_renders_as_element() {
        let html = HtmlRenderer::new().render(&parse("Hi :badge[new] and :icon"));
        assert_eq!(html, "<p>Hi <badge>new</badge> and <icon></icon></p>\n");
    }
}
