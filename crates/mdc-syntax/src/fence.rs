//! Code fence shielding for marker scans.
//!
//! Container and slot scans walk raw lines looking for marker runs. Lines
//! inside a fenced code block must never count as markers, so the scan feeds
//! every line through a [`FenceTracker`] first.

/// Shortest run of backticks or tildes that opens a fence.
const MIN_FENCE_LEN: usize = 3;

/// An open fence: its character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: u8,
    len: usize,
}

/// Tracks whether a line-by-line scan is inside a fenced code block.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line (leading whitespace allowed).
    ///
    /// Returns `true` when the line opened or closed a fence; such lines and
    /// every line while [`in_fence`](Self::in_fence) holds are shielded.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let text = line.trim_start().as_bytes();
        let Some(&first) = text.first() else {
            return false;
        };
        let run = text.iter().take_while(|&&b| b == first).count();

        match self.open {
            Some(fence) => {
                let closes = first == fence.marker
                    && run >= fence.len
                    && text[run..].iter().all(u8::is_ascii_whitespace);
                if closes {
                    self.open = None;
                }
                closes
            }
            None if matches!(first, b'`' | b'~') && run >= MIN_FENCE_LEN => {
                self.open = Some(OpenFence { marker: first, len: run });
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence_with_info() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("```md"));
        assert!(tracker.in_fence());
        assert!(!tracker.update("::"));
        assert!(tracker.in_fence());
        assert!(tracker.update("```"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_closer_needs_same_marker_and_length() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("~~~~"));
        assert!(!tracker.update("~~~"));
        assert!(!tracker.update("````"));
        assert!(!tracker.update("~~~~ trailing"));
        assert!(tracker.in_fence());
        assert!(tracker.update("~~~~~  "));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_short_runs_are_not_fences() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.update("``code``"));
        assert!(!tracker.update(":: note"));
        assert!(!tracker.update(""));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_indented_fence() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("   ```rust"));
        assert!(tracker.update("  ```"));
        assert!(!tracker.in_fence());
    }
}
