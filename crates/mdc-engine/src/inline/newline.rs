//! Soft and hard line breaks.

use super::{InlineRule, InlineState, is_space};
use crate::Error;
use crate::token::Nesting;

pub struct Newline;

impl InlineRule for Newline {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        if state.byte_at(state.pos) != Some(b'\n') {
            return Ok(false);
        }

        if !silent {
            // Two trailing spaces turn the break into a hard one.
            let trimmed = state.pending.trim_end_matches(' ').len();
            let spaces = state.pending.len() - trimmed;
            state.pending.truncate(trimmed);
            if spaces >= 2 {
                state.push("hardbreak", "br", Nesting::SelfClosing);
            } else {
                state.push("softbreak", "br", Nesting::SelfClosing);
            }
        }

        state.pos += 1;
        while state.byte_at(state.pos).is_some_and(is_space) {
            state.pos += 1;
        }
        Ok(true)
    }
}
