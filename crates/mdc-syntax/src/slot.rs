//! Named slots inside a container: `#name{props}` lines.
//!
//! A slot runs from its marker line to the next slot marker, to a bare run
//! of the enclosing container's marker length, or to the end of the
//! container. Markers inside fenced code or inside a nested container don't
//! end the slot.

use mdc_engine::{BlockRule, BlockState, Error, Nesting, ParentType};

use crate::container::{is_bare_run, marker_run};
use crate::fence::FenceTracker;
use crate::stack::{ContainerFrame, ContainerStack};
use crate::{MIN_MARKERS, kinds, parse_block_params, rules};

/// Tag of slot tokens.
pub const SLOT_TAG: &str = "template";

/// Block rule for slot markers.
#[derive(Debug, Clone, Copy)]
pub struct SlotRule {
    min_markers: usize,
}

impl SlotRule {
    /// Treat runs of at least `min_markers` colons as container markers.
    #[must_use]
    pub fn new(min_markers: usize) -> Self {
        Self { min_markers }
    }
}

impl Default for SlotRule {
    fn default() -> Self {
        Self::new(MIN_MARKERS)
    }
}

impl BlockRule for SlotRule {
    fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> Result<bool, Error> {
        // Slots are direct children of a container body.
        if state.parent != ParentType::Other(rules::CONTAINER) {
            return Ok(false);
        }
        let Some(frame) = ContainerStack::innermost(state) else {
            return Ok(false);
        };

        let text = state.line_text(start_line);
        let Some(rest) = text.strip_prefix('#') else {
            return Ok(false);
        };
        if rest.chars().next().is_none_or(char::is_whitespace) {
            return Ok(false);
        }

        let params = match parse_block_params(rest) {
            Ok(params) => params,
            Err(err) => {
                tracing::trace!(line = start_line, error = %err, "not a slot marker");
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
                "ignoring trailing text on slot marker"
            );
        }

        let end = self.slot_end(state, start_line, end_line, frame);

        {
            let mut scope = state.scope();
            scope.parent = ParentType::Other(rules::SLOTS);
            scope.line_max = end;

            let open = scope.push(kinds::SLOT, SLOT_TAG, Nesting::Open);
            open.attrs.set(format!("#{}", params.name), "");
            open.attrs.merge_all(params.props());
            open.map = Some((start_line, end));

            let md = scope.md;
            md.block.tokenize(&mut scope, start_line + 1, end)?;

            scope.push(kinds::SLOT, SLOT_TAG, Nesting::Close);
        }

        state.line = end;
        Ok(true)
    }
}

impl SlotRule {
    fn slot_end(
        &self,
        state: &BlockState<'_>,
        start_line: usize,
        end_line: usize,
        frame: ContainerFrame,
    ) -> usize {
        let mut fence = FenceTracker::new();
        // Marker lengths of nested containers opened inside the slot.
        let mut nested: Vec<usize> = Vec::new();

        for line in start_line + 1..end_line {
            let text = state.line_text(line);
            if fence.update(text) || fence.in_fence() {
                continue;
            }

            let run = marker_run(text);
            if run >= self.min_markers {
                if !is_bare_run(text, run) {
                    nested.push(run);
                } else if nested.last() == Some(&run) {
                    nested.pop();
                } else if nested.is_empty() && run == frame.marker_len {
                    return line;
                }
                continue;
            }

            if nested.is_empty() && is_slot_marker(text) {
                return line;
            }
        }

        end_line
    }
}

fn is_slot_marker(text: &str) -> bool {
    text.strip_prefix('#')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}
