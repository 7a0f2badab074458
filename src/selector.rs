//! Random target selection.

use crate::N_BUTTONS;
use crate::buffer::{ButtonSet, InsertError};
use crate::types::ButtonIndex;
use core::ops::Range;
use rand::Rng;

/// The buttons to press in a round.
pub type TargetSet = ButtonSet<N_BUTTONS>;

/// Draws how many targets a round of the current phase gets.
///
/// The count does not depend on the phase yet. A range reaching past the
/// panel falls back to `[1, N_BUTTONS)`.
pub fn phase_num_targets<R: Rng + ?Sized>(rng: &mut R, range: &Range<u8>) -> usize {
    if range.end as usize > N_BUTTONS {
        warn!("unexpected number of buttons");
        return rng.gen_range(1..N_BUTTONS);
    }
    rng.gen_range(range.start as usize..range.end as usize)
}

/// Picks the next free index at or after a random pivot, wrapping around.
///
/// Gives up after `capacity + 1` probes.
fn pick_free<R: Rng + ?Sized>(
    rng: &mut R,
    taken: &TargetSet,
    capacity: usize,
) -> Option<ButtonIndex> {
    let mut candidate = rng.gen_range(0..capacity * 10) % capacity;

    for _ in 0..=capacity {
        if !taken.contains(candidate as ButtonIndex) {
            return Some(candidate as ButtonIndex);
        }
        candidate = (candidate + 1) % capacity;
    }

    None
}

/// Adds `idx` to `targets`, logging why it was refused if it was.
pub fn push_target(targets: &mut TargetSet, idx: ButtonIndex) -> bool {
    match targets.insert(idx) {
        Ok(()) => {
            debug!("Adding target: {}", idx);
            true
        }
        Err(InsertError::OutOfRange) => {
            warn!("target should be in [0, {})", N_BUTTONS);
            false
        }
        Err(InsertError::Duplicate) | Err(InsertError::Full) => false,
    }
}

/// Draws up to `count` distinct indices from `[0, capacity)`.
///
/// `capacity` is clamped to [`N_BUTTONS`] and `count` to `capacity`. If the
/// scan runs out of free indices the selection stops early and the returned
/// set is smaller than asked for.
pub fn select_targets<R: Rng + ?Sized>(rng: &mut R, count: usize, capacity: usize) -> TargetSet {
    let capacity = capacity.min(N_BUTTONS);
    let count = count.min(capacity);
    let mut targets = TargetSet::new();

    for _ in 0..count {
        match pick_free(rng, &targets, capacity) {
            Some(idx) => {
                push_target(&mut targets, idx);
            }
            None => {
                warn!("no more random targets to pick");
                break;
            }
        }
    }

    targets
}
