//! Code spans.

use super::{InlineRule, InlineState};
use crate::Error;
use crate::token::Nesting;

pub struct Backticks;

impl InlineRule for Backticks {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        if state.byte_at(start) != Some(b'`') {
            return Ok(false);
        }

        let open_end = run_end(state, start);
        let len = open_end - start;

        // Look for a closing run of exactly the same length.
        let mut pos = open_end;
        while pos < state.pos_max {
            if state.byte_at(pos) != Some(b'`') {
                pos += 1;
                continue;
            }
            let close_end = run_end(state, pos);
            if close_end - pos == len {
                if !silent {
                    let content = code_content(&state.src[open_end..pos]);
                    let markup = state.src[start..open_end].to_owned();
                    let token = state.push("code_inline", "code", Nesting::SelfClosing);
                    token.content = content;
                    token.markup = markup;
                }
                state.pos = close_end;
                return Ok(true);
            }
            pos = close_end;
        }

        // Unmatched run: keep it as literal text.
        if !silent {
            let src = state.src;
            state.pending.push_str(&src[start..open_end]);
        }
        state.pos = open_end;
        Ok(true)
    }
}

fn run_end(state: &InlineState<'_>, pos: usize) -> usize {
    let mut pos = pos;
    while state.byte_at(pos) == Some(b'`') {
        pos += 1;
    }
    pos
}

/// Line endings become spaces; one padding space is stripped from each side.
fn code_content(raw: &str) -> String {
    let content = raw.replace('\n', " ");
    let padded = content.len() >= 2 && content.starts_with(' ') && content.ends_with(' ');
    if padded && !content.trim().is_empty() {
        content[1..content.len() - 1].to_owned()
    } else {
        content
    }
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
    fn test_code_span() {
        let tokens = inline("a `` b`c `` d");
        assert_eq!(tokens[1].kind, "code_inline");
        assert_eq!(tokens[1].content, "b`c");
        assert_eq!(tokens[1].markup, "``");
    }

    #[test]
    fn test_unmatched_run_is_text() {
        let tokens = inline("``a`");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "``a`");
    }
}
