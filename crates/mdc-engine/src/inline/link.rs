//! Inline links: `[label](destination "title")`.

use super::{InlineRule, InlineState};
use crate::Error;
use crate::token::Nesting;

pub struct Link;

impl InlineRule for Link {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        if state.byte_at(start) != Some(b'[') {
            return Ok(false);
        }

        let Some(label_end) = label_end(state, start + 1) else {
            return Ok(false);
        };
        if state.byte_at(label_end + 1) != Some(b'(') {
            return Ok(false);
        }

        let Some(target) = parse_target(state, label_end + 2) else {
            return Ok(false);
        };

        if !silent {
            let open = state.push("link_open", "a", Nesting::Open);
            open.attrs.set("href", target.href);
            if let Some(title) = target.title {
                open.attrs.set("title", title);
            }

            let md = state.md;
            md.inline.tokenize_range_of(state, start + 1, label_end)?;

            state.push("link_close", "a", Nesting::Close);
        }

        state.pos = target.end;
        Ok(true)
    }
}

/// Position of the `]` closing a label whose content starts at `from`.
///
/// Brackets nest; a backslash skips the next character.
pub(crate) fn label_end(state: &InlineState<'_>, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = from;
    while let Some(b) = state.byte_at(pos) {
        match b {
            b'\\' => pos += 1,
            b'[' => depth += 1,
            b']' if depth == 0 => return Some(pos),
            b']' => depth -= 1,
            _ => {}
        }
        pos += 1;
    }
    None
}

struct Target {
    href: String,
    title: Option<String>,
    /// Offset just past the closing `)`.
    end: usize,
}

/// Parse `destination "title")` starting right after the `(`.
fn parse_target(state: &InlineState<'_>, from: usize) -> Option<Target> {
    let mut pos = skip_whitespace(state, from);

    let href = if state.byte_at(pos) == Some(b'<') {
        let begin = pos + 1;
        let close = state.src[begin..state.pos_max].find(['>', '\n'])? + begin;
        if state.byte_at(close) != Some(b'>') {
            return None;
        }
        pos = close + 1;
        &state.src[begin..close]
    } else {
        let begin = pos;
        let mut parens = 0usize;
        while let Some(b) = state.byte_at(pos) {
            match b {
                b'(' => parens += 1,
                b')' if parens == 0 => break,
                b')' => parens -= 1,
                b if b.is_ascii_whitespace() => break,
                _ => {}
            }
            pos += 1;
        }
        &state.src[begin..pos]
    };

    let after_href = pos;
    pos = skip_whitespace(state, pos);

    let mut title = None;
    if pos > after_href
        && let Some(quote @ (b'"' | b'\'' | b'(')) = state.byte_at(pos)
    {
        let closing = if quote == b'(' { b')' } else { quote };
        let begin = pos + 1;
        let mut end = begin;
        while state.byte_at(end).is_some_and(|b| b != closing) {
            end += 1;
        }
        state.byte_at(end)?;
        title = Some(state.src[begin..end].to_owned());
        pos = skip_whitespace(state, end + 1);
    }

    if state.byte_at(pos) != Some(b')') {
        return None;
    }

    Some(Target {
        href: href.to_owned(),
        title,
        end: pos + 1,
    })
}

fn skip_whitespace(state: &InlineState<'_>, pos: usize) -> usize {
    let mut pos = pos;
    while state.byte_at(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn inline(src: &str) -> Vec<crate::Token> {
        let md = MarkdownParser::new();
        let mut out = Vec::new();
        md.inline.parse(src, &md, &mut out).unwrap();
        out
    }

    #[test]
    fn test_link_with_title() {
        let tokens = inline(r#"see [the *docs*](/docs "Docs") now"#);
        assert_eq!(tokens[1].kind, "link_open");
        assert_eq!(tokens[1].attrs.get("href"), Some("/docs"));
        assert_eq!(tokens[1].attrs.get("title"), Some("Docs"));
        assert_eq!(tokens[3].kind, "em_open");
        assert_eq!(tokens[6].kind, "link_close");
        assert_eq!(tokens[7].content, " now");
    }

    #[test]
    fn test_angle_destination() {
        let tokens = inline("[a](<b c>)");
        assert_eq!(tokens[0].attrs.get("href"), Some("b c"));
    }

    #[test]
    fn test_bracket_without_destination_is_text() {
        let tokens = inline("[a] b");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "[a] b");
    }

    #[test]
    fn test_unclosed_destination_is_text() {
        let tokens = inline("[a](b");
        assert_eq!(tokens.len(), 1);
    }
}
