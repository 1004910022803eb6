//! Runs of ordinary characters.

use super::{InlineRule, InlineState};
use crate::Error;

/// Characters that may start another inline construct.
fn is_terminator(b: u8) -> bool {
    matches!(
        b,
        b'\n'
            | b'!'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'*'
            | b'+'
            | b'-'
            | b':'
            | b'<'
            | b'='
            | b'>'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'^'
            | b'_'
            | b'`'
            | b'{'
            | b'}'
            | b'~'
    )
}

/// Swallows everything up to the next terminator character into pending text.
pub struct Text;

impl InlineRule for Text {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        let start = state.pos;
        let mut pos = start;
        while state.byte_at(pos).is_some_and(|b| !is_terminator(b)) {
            pos += 1;
        }
        if pos == start {
            return Ok(false);
        }

        if !silent {
            let src = state.src;
            state.pending.push_str(&src[start..pos]);
        }
        state.pos = pos;
        Ok(true)
    }
}
