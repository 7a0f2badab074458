//! Property tests for target selection, color draws and round classification

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reflex_lock::colors::{DEVICE_COLORS, DEVICE_ERROR_SETS, PALETTE_SIZE};
use reflex_lock::{ColorPalette, N_BUTTONS, Phase, PressTracker, TargetSet, select_targets};

fn target_set() -> impl Strategy<Value = TargetSet> {
    let indices: Vec<u8> = (0..N_BUTTONS as u8).collect();
    proptest::sample::subsequence(indices, 0..=N_BUTTONS)
        .prop_shuffle()
        .prop_map(|indices| TargetSet::from_slice(&indices).unwrap())
}

proptest! {
    #[test]
    fn selection_is_distinct_and_bounded(
        seed in any::<u64>(),
        count in 0usize..20,
        capacity in 0usize..20,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let targets = select_targets(&mut rng, count, capacity);

        prop_assert!(targets.len() <= count.min(capacity).min(N_BUTTONS));
        let slice = targets.as_slice();
        for (i, a) in slice.iter().enumerate() {
            prop_assert!((*a as usize) < capacity.min(N_BUTTONS));
            prop_assert!(!slice[i + 1..].contains(a));
        }
    }

    #[test]
    fn color_class_matches_request(
        seed in any::<u64>(),
        phase in 0u8..6,
        want_error in any::<bool>(),
    ) {
        let palette = ColorPalette::new(DEVICE_COLORS, DEVICE_ERROR_SETS);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let idx = palette.random_index(&mut rng, Phase(phase), want_error);
        prop_assert!(idx < PALETTE_SIZE);
        prop_assert_eq!(palette.is_error_color(Phase(phase), idx), want_error);
    }

    #[test]
    fn pressing_any_subset_of_targets_never_errors(
        targets in target_set(),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..N_BUTTONS),
    ) {
        prop_assume!(!targets.is_empty());
        let mut tracker = PressTracker::new();
        for pick in picks {
            tracker.record_press(targets.as_slice()[pick.index(targets.len())]);
        }
        prop_assert!(!tracker.is_error(&targets));
    }

    #[test]
    fn error_iff_some_press_outside_targets(
        targets in target_set(),
        presses in proptest::collection::vec(0u8..N_BUTTONS as u8, 0..12),
    ) {
        let mut tracker = PressTracker::new();
        for &idx in &presses {
            tracker.record_press(idx);
        }
        let outside = presses.iter().any(|&idx| !targets.contains(idx));
        prop_assert_eq!(tracker.is_error(&targets), outside);
    }

    #[test]
    fn match_iff_presses_equal_targets(
        targets in target_set(),
        presses in proptest::collection::vec(0u8..N_BUTTONS as u8, 0..12),
    ) {
        let mut tracker = PressTracker::new();
        for &idx in &presses {
            tracker.record_press(idx);
        }

        let same_set = tracker.len() == targets.len()
            && targets.iter().all(|idx| tracker.contains(idx))
            && tracker.presses().iter().all(|&idx| targets.contains(idx));
        prop_assert_eq!(tracker.is_match(&targets), same_set);
    }

    #[test]
    fn repeated_press_is_idempotent(idx in 0u8..N_BUTTONS as u8, repeats in 1usize..5) {
        let mut once = PressTracker::new();
        once.record_press(idx);

        let mut many = PressTracker::new();
        for _ in 0..repeats {
            many.record_press(idx);
        }
        prop_assert_eq!(once.presses(), many.presses());
    }
}
