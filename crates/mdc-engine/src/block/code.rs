//! Indented code blocks.

use super::{BlockRule, BlockState};
use crate::Error;
use crate::token::Nesting;

/// Columns of indentation that turn a line into code.
const CODE_INDENT: isize = 4;

/// Lines indented by four or more columns.
pub struct Code;

impl BlockRule for Code {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        if state.relative_indent(start_line) < CODE_INDENT {
            return Ok(false);
        }
        if silent {
            return Ok(true);
        }

        let mut next_line = start_line + 1;
        let mut last = next_line;
        while next_line < end_line {
            if state.is_empty(next_line) {
                next_line += 1;
                continue;
            }
            if state.relative_indent(next_line) >= CODE_INDENT {
                next_line += 1;
                last = next_line;
                continue;
            }
            break;
        }

        state.line = last;
        let mut content = state.get_lines(start_line, last, 4 + state.blk_indent, false);
        content.push('\n');

        let token = state.push("code_block", "code", Nesting::SelfClosing);
        token.content = content;
        token.map = Some((start_line, last));
        Ok(true)
    }
}
