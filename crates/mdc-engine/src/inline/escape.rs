//! Backslash escapes.

use super::{InlineRule, InlineState, is_space};
use crate::Error;
use crate::token::Nesting;

pub struct Escape;

impl InlineRule for Escape {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error> {
        if state.byte_at(state.pos) != Some(b'\\') {
            return Ok(false);
        }
        state.pos += 1;

        match state.byte_at(state.pos) {
            Some(b) if b.is_ascii_punctuation() => {
                if !silent {
                    state.pending.push(char::from(b));
                }
                state.pos += 1;
            }
            Some(b'\n') => {
                if !silent {
                    state.push("hardbreak", "br", Nesting::SelfClosing);
                }
                state.pos += 1;
                while state.byte_at(state.pos).is_some_and(is_space) {
                    state.pos += 1;
                }
            }
            _ => {
                if !silent {
                    state.pending.push('\\');
                }
            }
        }
        Ok(true)
    }
}
