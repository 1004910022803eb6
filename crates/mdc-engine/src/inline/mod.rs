//! Inline tokenizer.
//!
//! Runs over the `content` of each `inline` block token. Characters no rule
//! claims collect in [`InlineState::pending`] and are flushed as one `text`
//! token before the next real token is pushed.

mod backticks;
mod emphasis;
mod entity;
mod escape;
mod link;
mod newline;
mod text;

use std::ops::{Deref, DerefMut};

use crate::token::{Nesting, Token};
use crate::{Error, MarkdownParser, Ruler};

pub use backticks::Backticks;
pub use emphasis::Emphasis;
pub use entity::Entity;
pub use escape::Escape;
pub use link::Link;
pub use newline::Newline;
pub use text::Text;

/// An inline rule.
///
/// Called with the cursor on [`InlineState::pos`]. A matching rule advances
/// `pos` past what it consumed and returns `Ok(true)`; in `silent` mode it
/// advances without emitting tokens.
pub trait InlineRule: Send + Sync {
    fn run(&self, state: &mut InlineState<'_>, silent: bool) -> Result<bool, Error>;
}

/// Mutable state of one inline pass.
pub struct InlineState<'a> {
    /// Source of the enclosing `inline` token.
    pub src: &'a str,
    pub md: &'a MarkdownParser,
    pub tokens: Vec<Token>,
    pub pos: usize,
    /// Exclusive end of the range being tokenized.
    pub pos_max: usize,
    /// Text waiting to become a `text` token.
    pub pending: String,
    pub level: usize,
    depth: usize,
}

impl<'a> InlineState<'a> {
    #[must_use]
    pub fn new(src: &'a str, md: &'a MarkdownParser) -> Self {
        Self {
            src,
            md,
            tokens: Vec::new(),
            pos: 0,
            pos_max: src.len(),
            pending: String::new(),
            level: 0,
            depth: 0,
        }
    }

    /// Byte at `pos`, if it's inside the current range.
    #[must_use]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos < self.pos_max {
            self.src.as_bytes().get(pos).copied()
        } else {
            None
        }
    }

    /// Character right before `pos`, ignoring range limits.
    #[must_use]
    pub fn char_before(&self, pos: usize) -> Option<char> {
        self.src[..pos].chars().next_back()
    }

    /// Turn pending text into a `text` token.
    pub fn push_pending(&mut self) {
        let mut token = Token::text(std::mem::take(&mut self.pending));
        token.level = self.level;
        self.tokens.push(token);
    }

    /// Push an inline token, flushing pending text first.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        if !self.pending.is_empty() {
            self.push_pending();
        }

        let mut token = Token::new(kind, tag, nesting);
        if nesting == Nesting::Close {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting == Nesting::Open {
            self.level += 1;
        }

        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    /// Save `pos` and `pos_max`; they are restored when the guard drops.
    pub fn scope(&mut self) -> InlineScope<'_, 'a> {
        InlineScope {
            saved_pos: self.pos,
            saved_pos_max: self.pos_max,
            state: self,
        }
    }
}

/// Guard returned by [`InlineState::scope`].
pub struct InlineScope<'s, 'a> {
    state: &'s mut InlineState<'a>,
    saved_pos: usize,
    saved_pos_max: usize,
}

impl<'a> Deref for InlineScope<'_, 'a> {
    type Target = InlineState<'a>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for InlineScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for InlineScope<'_, '_> {
    fn drop(&mut self) {
        self.state.pos = self.saved_pos;
        self.state.pos_max = self.saved_pos_max;
    }
}

/// Inline rule chain plus the tokenizer that drives it.
pub struct InlineParser {
    pub ruler: Ruler<dyn InlineRule>,
}

impl Default for InlineParser {
    fn default() -> Self {
        let mut ruler: Ruler<dyn InlineRule> = Ruler::new();
        ruler.push("text", Box::new(Text), &[]);
        ruler.push("newline", Box::new(Newline), &[]);
        ruler.push("escape", Box::new(Escape), &[]);
        ruler.push("backticks", Box::new(Backticks), &[]);
        ruler.push("emphasis", Box::new(Emphasis), &[]);
        ruler.push("link", Box::new(Link), &[]);
        ruler.push("entity", Box::new(Entity), &[]);
        Self { ruler }
    }
}

impl InlineParser {
    /// Tokenize `src` and append the resulting tokens to `out`.
    ///
    /// # Errors
    ///
    /// See [`tokenize`](Self::tokenize).
    pub fn parse(&self, src: &str, md: &MarkdownParser, out: &mut Vec<Token>) -> Result<(), Error> {
        if src.is_empty() {
            return Ok(());
        }

        let mut state = InlineState::new(src, md);
        self.tokenize(&mut state)?;
        out.append(&mut state.tokens);
        Ok(())
    }

    /// Tokenize `[state.pos, state.pos_max)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NestingTooDeep`] when recursion exceeds
    /// `max_nesting`, [`Error::NoProgress`] when a rule matches without
    /// advancing, and any hard error raised by a rule.
    pub fn tokenize(&self, state: &mut InlineState<'_>) -> Result<(), Error> {
        let limit = state.md.options.max_nesting;
        if state.depth >= limit {
            return Err(Error::NestingTooDeep { limit });
        }

        state.depth += 1;
        let result = self.tokenize_range(state);
        state.depth -= 1;
        result
    }

    fn tokenize_range(&self, state: &mut InlineState<'_>) -> Result<(), Error> {
        let end = state.pos_max;

        while state.pos < end {
            let start = state.pos;
            let mut matched = false;
            for (name, rule) in self.ruler.rules() {
                if rule.run(state, false)? {
                    if state.pos <= start {
                        return Err(Error::NoProgress {
                            rule: name.to_owned(),
                        });
                    }
                    matched = true;
                    break;
                }
            }

            if matched {
                continue;
            }

            if let Some(c) = state.src[start..].chars().next() {
                state.pending.push(c);
                state.pos = start + c.len_utf8();
            } else {
                break;
            }
        }

        if !state.pending.is_empty() {
            state.push_pending();
        }
        Ok(())
    }

    /// Run `tokenize` over `[start, end)` and restore the cursor afterwards.
    ///
    /// # Errors
    ///
    /// See [`tokenize`](Self::tokenize).
    pub fn tokenize_range_of(
        &self,
        state: &mut InlineState<'_>,
        start: usize,
        end: usize,
    ) -> Result<(), Error> {
        let mut scope = state.scope();
        scope.pos = start;
        scope.pos_max = end;
        self.tokenize(&mut scope)
    }
}

pub(crate) fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}
