//! Fenced code blocks (```` ``` ```` and `~~~`).

use super::{BlockRule, BlockState};
use crate::Error;
use crate::token::Nesting;

/// Minimum length of a fence marker run.
pub const MIN_FENCE_LEN: usize = 3;

pub struct Fence;

impl BlockRule for Fence {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        if state.relative_indent(start_line) >= 4 {
            return Ok(false);
        }

        let src = state.src;
        let info = state.line_info(start_line);
        let start = info.content_start();
        let max = info.end;
        if start + MIN_FENCE_LEN > max {
            return Ok(false);
        }

        let marker = src.as_bytes()[start];
        if marker != b'`' && marker != b'~' {
            return Ok(false);
        }

        let run_end = state.skip_chars(start, marker).min(max);
        let len = run_end - start;
        if len < MIN_FENCE_LEN {
            return Ok(false);
        }

        let markup = &src[start..run_end];
        let params = &src[run_end..max];
        if marker == b'`' && params.contains('`') {
            return Ok(false);
        }
        if silent {
            return Ok(true);
        }

        let mut next_line = start_line;
        let mut closed = false;
        loop {
            next_line += 1;
            if next_line >= end_line {
                break;
            }

            let line = state.line_info(next_line);
            let pos = line.content_start();
            if pos < line.end && line.s_count < state.blk_indent {
                break;
            }
            if pos >= line.end || src.as_bytes()[pos] != marker {
                continue;
            }
            if state.relative_indent(next_line) >= 4 {
                continue;
            }

            let close_end = state.skip_chars(pos, marker).min(line.end);
            if close_end - pos < len {
                continue;
            }
            if state.skip_spaces(close_end) < line.end {
                continue;
            }

            closed = true;
            break;
        }

        let indent = info.s_count;
        state.line = next_line + usize::from(closed);
        let content = state.get_lines(start_line + 1, next_line, indent, true);
        let end = state.line;

        let token = state.push("fence", "code", Nesting::SelfClosing);
        token.info = params.trim().to_owned();
        token.content = content;
        token.markup = markup.to_owned();
        token.map = Some((start_line, end));
        Ok(true)
    }
}
