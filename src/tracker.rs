//! Press buffering and round classification.

use crate::N_BUTTONS;
use crate::buffer::{ButtonSet, InsertError};
use crate::selector::TargetSet;
use crate::types::ButtonIndex;

/// Records the distinct buttons pressed during the current round.
///
/// The tracker does no lock gating of its own; the engine only forwards
/// presses while the panel is unlocked.
#[derive(Debug, Clone, Default)]
pub struct PressTracker {
    presses: ButtonSet<N_BUTTONS>,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self {
            presses: ButtonSet::new(),
        }
    }

    /// Records a press of `idx`.
    ///
    /// Returns `true` if the press was new. Repeated presses of the same
    /// button and out-of-range indices are ignored.
    pub fn record_press(&mut self, idx: ButtonIndex) -> bool {
        match self.presses.insert(idx) {
            Ok(()) => {
                debug!("Pushing: {}", idx);
                true
            }
            Err(InsertError::OutOfRange) => {
                warn!("press index {} out of range", idx);
                false
            }
            Err(InsertError::Duplicate) | Err(InsertError::Full) => false,
        }
    }

    /// Returns true if any recorded press is not a target.
    pub fn is_error(&self, targets: &TargetSet) -> bool {
        self.presses.iter().any(|idx| !targets.contains(idx))
    }

    /// Returns true if exactly the targets have been pressed.
    ///
    /// Sizes are compared first, then every target must have a press.
    pub fn is_match(&self, targets: &TargetSet) -> bool {
        if self.presses.len() != targets.len() {
            return false;
        }
        targets.iter().all(|idx| self.presses.contains(idx))
    }

    #[inline]
    pub fn contains(&self, idx: ButtonIndex) -> bool {
        self.presses.contains(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.presses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    /// Presses in the order they were recorded.
    #[inline]
    pub fn presses(&self) -> &[ButtonIndex] {
        self.presses.as_slice()
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }
}
