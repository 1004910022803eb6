//! Block-level tokenizer.
//!
//! The block pass walks the line table and dispatches each line to the rules
//! of the block [`Ruler`] in priority order. Rules receive the shared
//! [`BlockState`] and may re-enter [`BlockParser::tokenize`] over any
//! sub-range of lines; [`BlockState::scope`] restores the range limits once
//! the nested call is done.

mod code;
mod fence;
mod heading;
mod hr;
mod paragraph;

use std::ops::{Deref, DerefMut};

use crate::lines::{self, LineInfo, LineTable};
use crate::token::{Nesting, Token};
use crate::{Env, Error, MarkdownParser, Ruler};

pub use code::Code;
pub use fence::Fence;
pub use heading::Heading;
pub use hr::Hr;
pub use paragraph::Paragraph;

/// Interrupt chains a rule can join through its `alt` list.
pub mod chains {
    /// Rules allowed to end a paragraph without a blank line.
    pub const PARAGRAPH: &str = "paragraph";
    /// Rules allowed to end a link reference definition.
    pub const REFERENCE: &str = "reference";
    /// Rules allowed to end a lazy blockquote continuation.
    pub const BLOCKQUOTE: &str = "blockquote";
    /// Rules allowed to end a list item.
    pub const LIST: &str = "list";
}

/// A block rule.
///
/// `run` is called with the cursor on `start_line`. A matching rule pushes
/// its tokens, moves [`BlockState::line`] past what it consumed and returns
/// `Ok(true)`. In `silent` mode it only reports whether it would match and
/// must leave the state untouched.
pub trait BlockRule: Send + Sync {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> Result<bool, Error>;
}

/// What kind of block is currently being tokenized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentType {
    Root,
    Paragraph,
    /// Any other construct, named by its rule.
    Other(&'static str),
}

/// Mutable state of one block pass.
pub struct BlockState<'a> {
    /// Normalized source.
    pub src: &'a str,
    /// Parser that owns the rule chains; rules use it to recurse.
    pub md: &'a MarkdownParser,
    /// Per-pass plugin scratch storage.
    pub env: &'a mut Env,
    /// Emitted tokens.
    pub tokens: Vec<Token>,
    lines: LineTable,
    /// Next line to tokenize.
    pub line: usize,
    /// Hard limit for lazy continuation scans.
    pub line_max: usize,
    /// Indentation (in columns) of the enclosing block.
    pub blk_indent: usize,
    /// Current nesting level of the token stream.
    pub level: usize,
    /// Construct whose body is being tokenized; the component rules only
    /// fire directly inside a container.
    pub parent: ParentType,
    /// Loose/tight flag of the last tokenized run.
    pub tight: bool,
    depth: usize,
}

impl<'a> BlockState<'a> {
    #[must_use]
    pub fn new(src: &'a str, md: &'a MarkdownParser, env: &'a mut Env) -> Self {
        let lines = LineTable::new(src);
        let line_max = lines.len();
        Self {
            src,
            md,
            env,
            tokens: Vec::new(),
            lines,
            line: 0,
            line_max,
            blk_indent: 0,
            level: 0,
            parent: ParentType::Root,
            tight: false,
            depth: 0,
        }
    }

    /// Consume the state, returning the emitted tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Push a block token, keeping `level` balanced.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: Nesting) -> &mut Token {
        let mut token = Token::new(kind, tag, nesting);
        token.block = true;

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

    /// Number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Offsets of `line`.
    #[must_use]
    pub fn line_info(&self, line: usize) -> LineInfo {
        self.lines.get(line)
    }

    /// Whether `line` holds only whitespace.
    #[must_use]
    pub fn is_empty(&self, line: usize) -> bool {
        let info = self.lines.get(line);
        info.content_start() >= info.end
    }

    /// First non-empty line at or after `from`, bounded by `line_max`.
    #[must_use]
    pub fn skip_empty_lines(&self, from: usize) -> usize {
        (from..self.line_max)
            .find(|&line| !self.is_empty(line))
            .unwrap_or(from.max(self.line_max))
    }

    /// First offset at or after `pos` that isn't a space or tab.
    #[must_use]
    pub fn skip_spaces(&self, pos: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut pos = pos;
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        pos
    }

    /// First offset at or after `pos` that isn't `ch`.
    #[must_use]
    pub fn skip_chars(&self, pos: usize, ch: u8) -> usize {
        let bytes = self.src.as_bytes();
        let mut pos = pos;
        while pos < bytes.len() && bytes[pos] == ch {
            pos += 1;
        }
        pos
    }

    /// Move `pos` back over spaces and tabs, never below `min`.
    #[must_use]
    pub fn skip_spaces_back(&self, pos: usize, min: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut pos = pos;
        while pos > min && is_space(bytes[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    /// Move `pos` back over `ch`, never below `min`.
    #[must_use]
    pub fn skip_chars_back(&self, pos: usize, ch: u8, min: usize) -> usize {
        let bytes = self.src.as_bytes();
        let mut pos = pos;
        while pos > min && bytes[pos - 1] == ch {
            pos -= 1;
        }
        pos
    }

    /// Text of `line` from its first non-blank character.
    #[must_use]
    pub fn line_text(&self, line: usize) -> &'a str {
        let info = self.lines.get(line);
        &self.src[info.content_start()..info.end]
    }

    /// Join lines `[begin, end)`, stripping `indent` columns from each.
    #[must_use]
    pub fn get_lines(&self, begin: usize, end: usize, indent: usize, keep_last_lf: bool) -> String {
        lines::get_lines(self.src, &self.lines, begin, end, indent, keep_last_lf)
    }

    /// Indentation of `line` relative to the enclosing block.
    #[must_use]
    pub fn relative_indent(&self, line: usize) -> isize {
        signed(self.lines.get(line).s_count) - signed(self.blk_indent)
    }

    /// Save `line_max`, `blk_indent` and `parent`; they are restored when
    /// the returned guard is dropped.
    pub fn scope(&mut self) -> BlockScope<'_, 'a> {
        BlockScope {
            saved_line_max: self.line_max,
            saved_blk_indent: self.blk_indent,
            saved_parent: self.parent,
            state: self,
        }
    }
}

/// Guard returned by [`BlockState::scope`].
pub struct BlockScope<'s, 'a> {
    state: &'s mut BlockState<'a>,
    saved_line_max: usize,
    saved_blk_indent: usize,
    saved_parent: ParentType,
}

impl<'a> Deref for BlockScope<'_, 'a> {
    type Target = BlockState<'a>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for BlockScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for BlockScope<'_, '_> {
    fn drop(&mut self) {
        self.state.line_max = self.saved_line_max;
        self.state.blk_indent = self.saved_blk_indent;
        self.state.parent = self.saved_parent;
    }
}

/// Block rule chain plus the tokenizer that drives it.
pub struct BlockParser {
    pub ruler: Ruler<dyn BlockRule>,
}

impl Default for BlockParser {
    fn default() -> Self {
        use chains::{BLOCKQUOTE, LIST, PARAGRAPH, REFERENCE};

        let mut ruler: Ruler<dyn BlockRule> = Ruler::new();
        ruler.push("code", Box::new(Code), &[]);
        ruler.push(
            "fence",
            Box::new(Fence),
            &[PARAGRAPH, REFERENCE, BLOCKQUOTE, LIST],
        );
        ruler.push("hr", Box::new(Hr), &[PARAGRAPH, REFERENCE, BLOCKQUOTE, LIST]);
        ruler.push(
            "heading",
            Box::new(Heading),
            &[PARAGRAPH, REFERENCE, BLOCKQUOTE],
        );
        ruler.push("paragraph", Box::new(Paragraph), &[]);
        Self { ruler }
    }
}

impl BlockParser {
    /// Tokenize lines `[start_line, end_line)` into `state.tokens`.
    ///
    /// Stops early at a non-empty line indented less than `blk_indent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NestingTooDeep`] when recursion exceeds
    /// `max_nesting`, [`Error::NoProgress`] when a rule matches without
    /// consuming a line, and any hard error raised by a rule.
    pub fn tokenize(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
    ) -> Result<(), Error> {
        let limit = state.md.options.max_nesting;
        if state.depth >= limit {
            return Err(Error::NestingTooDeep { limit });
        }

        state.depth += 1;
        let result = self.tokenize_range(state, start_line, end_line);
        state.depth -= 1;
        result
    }

    fn tokenize_range(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
    ) -> Result<(), Error> {
        let mut line = start_line;
        let mut has_empty_lines = false;

        while line < end_line {
            line = state.skip_empty_lines(line);
            state.line = line;
            if line >= end_line {
                break;
            }

            if state.line_info(line).s_count < state.blk_indent {
                break;
            }

            let mut matched = false;
            for (name, rule) in self.ruler.rules() {
                if rule.run(state, line, end_line, false)? {
                    if state.line <= line {
                        return Err(Error::NoProgress {
                            rule: name.to_owned(),
                        });
                    }
                    tracing::trace!(rule = name, line, "block rule matched");
                    matched = true;
                    break;
                }
            }

            if !matched {
                tracing::debug!(line, "no block rule matched, skipping line");
                state.line = line + 1;
            }

            state.tight = !has_empty_lines;
            if state.is_empty(state.line - 1) {
                has_empty_lines = true;
            }

            line = state.line;
            if line < end_line && state.is_empty(line) {
                has_empty_lines = true;
                line += 1;
                state.line = line;
            }
        }

        Ok(())
    }

    /// Probe the rules of `chain` at `line` in silent mode.
    ///
    /// # Errors
    ///
    /// Propagates hard errors raised by a probed rule.
    pub fn interrupts(
        &self,
        chain: &str,
        state: &mut BlockState<'_>,
        line: usize,
        end_line: usize,
    ) -> Result<bool, Error> {
        for (_, rule) in self.ruler.chain(chain) {
            if rule.run(state, line, end_line, true)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

pub(crate) fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}
