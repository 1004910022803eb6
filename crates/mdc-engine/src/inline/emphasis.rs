//! Emphasis and strong emphasis.
//!
//! A simplified delimiter model: an opening run of `*` or `_` pairs with the
//! next run of the same character and length. One marker yields `em`, two
//! or more yield `strong`.

use super::{InlineRule, InlineState};
use crate::Error;
use crate::token::Nesting;

pub struct Emphasis;

impl InlineRule for Emphasis {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        let marker = match state.byte_at(start) {
            Some(b @ (b'*' | b'_')) => b,
            _ => return Ok(false),
        };

        // `_` doesn't open inside a word.
        if marker == b'_' && state.char_before(start).is_some_and(char::is_alphanumeric) {
            return Ok(false);
        }

        let open_end = run_end(state, start, marker);
        let len = open_end - start;
        match state.byte_at(open_end) {
            Some(b) if !b.is_ascii_whitespace() => {}
            _ => return Ok(false),
        }

        let closer = find_closer(state, open_end, marker, len, true)
            .or_else(|| find_closer(state, open_end, marker, len, false));
        let Some(close) = closer else {
            return Ok(false);
        };
        let close_end = close + len;

        if !silent {
            let (kind, tag) = if len == 1 { ("em", "em") } else { ("strong", "strong") };
            let markup = state.src[start..open_end].to_owned();

            let open = state.push(&format!("{kind}_open"), tag, Nesting::Open);
            open.markup.clone_from(&markup);

            let md = state.md;
            md.inline.tokenize_range_of(state, open_end, close)?;

            let close_token = state.push(&format!("{kind}_close"), tag, Nesting::Close);
            close_token.markup = markup;
        }

        state.pos = close_end;
        Ok(true)
    }
}

fn run_end(state: &InlineState<'_>, pos: usize, marker: u8) -> usize {
    let mut pos = pos;
    while state.byte_at(pos) == Some(marker) {
        pos += 1;
    }
    pos
}

/// Start of the closing delimiter.
///
/// With `exact`, only a run of exactly `len` markers closes. Otherwise the
/// last `len` markers of any longer run do.
fn find_closer(
    state: &InlineState<'_>,
    from: usize,
    marker: u8,
    len: usize,
    exact: bool,
) -> Option<usize> {
    let mut pos = from;
    while pos < state.pos_max {
        match state.byte_at(pos) {
            Some(b'\\') => pos += 2,
            Some(b) if b == marker => {
                let end = run_end(state, pos, marker);
                let after_word = marker == b'_'
                    && state.src[end..state.pos_max]
                        .chars()
                        .next()
                        .is_some_and(char::is_alphanumeric);
                let before_space = state.char_before(pos).is_none_or(char::is_whitespace);

                let run = end - pos;
                let fits = if exact { run == len } else { run >= len };
                if fits && pos > from && !before_space && !after_word {
                    return Some(end - len);
                }
                pos = end;
            }
            _ => pos += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;
    use pretty_assertions::assert_eq;

    fn render(src: &str) -> Vec<String> {
        let md = MarkdownParser::new();
        let mut out = Vec::new();
        md.inline.parse(src, &md, &mut out).unwrap();
        out.into_iter()
            .map(|t| {
                if t.kind == "text" {
                    t.content
                } else {
                    t.kind
                }
            })
            .collect()
    }

    #[test]
    fn test_em_and_strong() {
        assert_eq!(
            render("a *b* __c__"),
            vec!["a ", "em_open", "b", "em_close", " ", "strong_open", "c", "strong_close"]
        );
    }

    #[test]
    fn test_spaced_marker_is_text() {
        assert_eq!(render("a * b *"), vec!["a * b *"]);
    }

    #[test]
    fn test_intraword_underscore() {
        assert_eq!(render("snake_case_name"), vec!["snake_case_name"]);
    }

    #[test]
    fn test_nested_inside_strong() {
        assert_eq!(
            render("**a *b***"),
            vec!["strong_open", "a ", "em_open", "b", "em_close", "strong_close"]
        );
    }
}
