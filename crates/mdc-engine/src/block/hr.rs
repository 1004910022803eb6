//! Thematic breaks (`***`, `---`, `___`).

use super::{BlockRule, BlockState, is_space};
use crate::Error;
use crate::token::Nesting;

pub struct Hr;

impl BlockRule for Hr {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        _end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        if state.relative_indent(start_line) >= 4 {
            return Ok(false);
        }

        let bytes = state.line_text(start_line).as_bytes();
        let Some(&marker) = bytes.first() else {
            return Ok(false);
        };
        if !matches!(marker, b'*' | b'-' | b'_') {
            return Ok(false);
        }

        let mut count = 0;
        for &b in bytes {
            if b == marker {
                count += 1;
            } else if !is_space(b) {
                return Ok(false);
            }
        }
        if count < 3 {
            return Ok(false);
        }
        if silent {
            return Ok(true);
        }

        state.line = start_line + 1;
        let token = state.push("hr", "hr", Nesting::SelfClosing);
        token.map = Some((start_line, start_line + 1));
        token.markup = char::from(marker).to_string().repeat(count);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::MarkdownParser;

    #[test]
    fn test_spaced_markers() {
        let tokens = MarkdownParser::new().parse("* * *\n").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, "hr");
        assert_eq!(tokens[0].markup, "***");
    }

    #[test]
    fn test_two_markers_is_text() {
        let tokens = MarkdownParser::new().parse("--\n").unwrap();
        assert_eq!(tokens[0].kind, "paragraph_open");
    }
}
