//! Stack of open containers, kept in the per-pass [`Env`](mdc_engine::Env).

use std::ops::{Deref, DerefMut};

use mdc_engine::BlockState;

/// One open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContainerFrame {
    /// Index of the `mdc_block_open` token in the block stream.
    pub(crate) token_index: usize,
    /// Length of the opening marker run.
    pub(crate) marker_len: usize,
}

/// Open containers, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ContainerStack {
    frames: Vec<ContainerFrame>,
}

impl ContainerStack {
    /// Innermost open container of the current pass.
    pub(crate) fn innermost(state: &BlockState<'_>) -> Option<ContainerFrame> {
        state
            .env
            .get::<Self>()
            .and_then(|stack| stack.frames.last().copied())
    }
}

/// Keeps a container on the stack while its children are tokenized.
///
/// The frame is popped when the guard drops, whichever way the child pass
/// exits.
pub(crate) struct ContainerGuard<'s, 'a> {
    state: &'s mut BlockState<'a>,
}

impl<'s, 'a> ContainerGuard<'s, 'a> {
    pub(crate) fn enter(state: &'s mut BlockState<'a>, frame: ContainerFrame) -> Self {
        state.env.get_or_default::<ContainerStack>().frames.push(frame);
        Self { state }
    }
}

impl<'a> Deref for ContainerGuard<'_, 'a> {
    type Target = BlockState<'a>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for ContainerGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for ContainerGuard<'_, '_> {
    fn drop(&mut self) {
        if let Some(stack) = self.state.env.get_mut::<ContainerStack>() {
            stack.frames.pop();
        }
    }
}
