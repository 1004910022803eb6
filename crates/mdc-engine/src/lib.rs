//! Line-oriented markdown tokenizer with pluggable rule chains.
//!
//! The engine turns a document into a flat stream of [`Token`]s. Block rules
//! run over the line table, inline rules over the text of each `inline`
//! token. Both chains live in a [`Ruler`] so plugins can insert their own
//! rules relative to the built-in ones, mark them as interrupters of other
//! constructs, and re-enter either tokenizer over a sub-range.
//!
//! # Quick Start
//!
//! ```
//! use mdc_engine::{HtmlRenderer, MarkdownParser};
//!
//! let md = MarkdownParser::new();
//! let tokens = md.parse("Hello *world*\n").unwrap();
//! let html = HtmlRenderer::new().render(&tokens);
//! assert_eq!(html, "<p>Hello <em>world</em></p>\n");
//! ```
//!
//! # Re-entrancy
//!
//! Rules that tokenize nested content borrow the parser from the state and
//! call back into it. [`BlockState::scope`] and [`InlineState::scope`] save
//! the range limits and put them back when the guard drops, on every exit
//! path.

pub mod block;
mod env;
mod error;
mod html;
pub mod inline;
mod lines;
mod parser;
mod ruler;
mod token;

pub use block::{BlockRule, BlockScope, BlockState, ParentType};
pub use env::Env;
pub use error::Error;
pub use html::{HtmlRenderer, escape_html};
pub use inline::{InlineRule, InlineScope, InlineState};
pub use lines::{LineInfo, LineTable, normalize};
pub use parser::{DEFAULT_MAX_NESTING, MarkdownParser, ParserOptions, Plugin};
pub use ruler::Ruler;
pub use token::{Attrs, CLASS_ATTR, Nesting, Token};
