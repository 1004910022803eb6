//! Fenced container blocks: `::name{props}` ... `::`.
//!
//! The opener is a run of at least `min_markers` colons followed by block
//! params. The closer is a bare run of exactly the same length. Lines inside
//! fenced code never count, and an equal-length run with trailing text opens
//! a nested container that must close first. A container without a closer
//! ends at the edge of the enclosing range.

use mdc_engine::{BlockRule, BlockState, Error, Nesting, ParentType, Token};

use crate::fence::FenceTracker;
use crate::stack::{ContainerFrame, ContainerGuard};
use crate::{MARKER, MIN_MARKERS, kinds, parse_block_params, rules};

/// Block rule for fenced containers.
#[derive(Debug, Clone, Copy)]
pub struct ContainerRule {
    min_markers: usize,
}

impl ContainerRule {
    /// Require at least `min_markers` colons to open a container.
    #[must_use]
    pub fn new(min_markers: usize) -> Self {
        Self { min_markers }
    }
}

impl Default for ContainerRule {
    fn default() -> Self {
        Self::new(MIN_MARKERS)
    }
}

/// Where a container's search for its closer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Close {
    /// A closing run on this line.
    Explicit(usize),
    /// Range boundary (or a dedented line) at this line; nothing consumed.
    Auto(usize),
}

impl Close {
    fn line(self) -> usize {
        match self {
            Self::Explicit(line) | Self::Auto(line) => line,
        }
    }
}

impl BlockRule for ContainerRule {
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

        let text = state.line_text(start_line);
        let run = marker_run(text);
        if run < self.min_markers {
            return Ok(false);
        }

        let params = match parse_block_params(&text[run..]) {
            Ok(params) => params,
            Err(err) => {
                tracing::trace!(line = start_line, error = %err, "not a container opener");
                return Ok(false);
            }
        };

        if silent {
            return Ok(true);
        }

        if let Some(remaining) = &params.remaining {
            tracing::debug!(
                line = start_line,
                name = %params.name,
                remaining = %remaining,
                "ignoring trailing text on container opener"
            );
        }

        let close = find_closer(state, start_line, end_line, run);
        if let Close::Auto(line) = close {
            tracing::debug!(
                line = start_line,
                name = %params.name,
                end = line,
                "container auto-closed"
            );
        }
        let next_line = close.line();
        let markup = &text[..run];
        let indent = state.line_info(start_line).s_count;

        {
            let mut scope = state.scope();
            scope.parent = ParentType::Other(rules::CONTAINER);
            scope.line_max = next_line;

            let open = scope.push(kinds::CONTAINER_OPEN, &params.name, Nesting::Open);
            open.markup = markup.to_owned();
            open.info.clone_from(&params.name);
            open.map = Some((start_line, next_line));
            open.attrs.merge_all(params.props());
            let open_index = scope.tokens.len() - 1;

            {
                let mut container = ContainerGuard::enter(
                    &mut scope,
                    ContainerFrame {
                        token_index: open_index,
                        marker_len: run,
                    },
                );
                container.blk_indent = indent;
                let md = container.md;
                md.block.tokenize(&mut container, start_line + 1, next_line)?;
            }

            let close_token = scope.push(kinds::CONTAINER_CLOSE, &params.name, Nesting::Close);
            close_token.markup = markup.to_owned();

            hide_lone_paragraph(&mut scope.tokens, open_index);
        }

        state.line = match close {
            Close::Explicit(line) => line + 1,
            Close::Auto(line) => line,
        };
        Ok(true)
    }
}

/// Length of the colon run at the start of `text`.
pub(crate) fn marker_run(text: &str) -> usize {
    text.bytes().take_while(|&b| char::from(b) == MARKER).count()
}

/// Whether `text` is nothing but a marker run of exactly `len` colons.
pub(crate) fn is_bare_run(text: &str, len: usize) -> bool {
    marker_run(text) == len && text[len..].trim().is_empty()
}

fn find_closer(state: &BlockState<'_>, start_line: usize, end_line: usize, run: usize) -> Close {
    let mut fence = FenceTracker::new();
    let mut nested = 0usize;

    for line in start_line + 1..end_line {
        if !state.is_empty(line) && state.line_info(line).s_count < state.blk_indent {
            return Close::Auto(line);
        }

        let text = state.line_text(line);
        if fence.update(text) || fence.in_fence() {
            continue;
        }

        if marker_run(text) != run {
            continue;
        }

        if !is_bare_run(text, run) {
            nested += 1;
        } else if nested > 0 {
            nested -= 1;
        } else {
            return Close::Explicit(line);
        }
    }

    Close::Auto(end_line)
}

/// Hide the wrapper of a container holding a single short paragraph.
fn hide_lone_paragraph(tokens: &mut [Token], open_index: usize) {
    let level = tokens[open_index].level + 1;
    let close_index = tokens.len() - 1;
    let children: Vec<usize> = (open_index + 1..close_index)
        .filter(|&i| tokens[i].level == level)
        .collect();

    if children.len() > 2 {
        return;
    }
    for i in children {
        if tokens[i].tag == "p" {
            tokens[i].hidden = true;
        }
    }
}
