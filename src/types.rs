//! Core types for phase rules and round outcomes.

/// Zero-based index of a game button (and of the pixel lighting it).
pub type ButtonIndex = u8;

/// Difficulty tier of a phase.
///
/// Later phases demand shorter streaks but give less time per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tempo {
    /// Phase 0.
    Long,

    /// Phase 1.
    Medium,

    /// Every phase from 2 onwards.
    Short,
}

impl Tempo {
    /// Consecutive matched rounds needed to clear a phase at this tempo.
    pub const fn hit_streak(self) -> u8 {
        match self {
            Tempo::Long => 6,
            Tempo::Medium => 4,
            Tempo::Short => 3,
        }
    }

    /// Time allowed for a single round, in milliseconds.
    pub const fn max_span_millis(self) -> u64 {
        match self {
            Tempo::Long => 10_000,
            Tempo::Medium => 6_000,
            Tempo::Short => 5_000,
        }
    }
}

/// A puzzle phase.
///
/// Phases only ever move forward, one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(pub u8);

impl Phase {
    /// The first phase.
    pub const FIRST: Phase = Phase(0);

    /// Returns the phase index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the following phase.
    #[inline]
    pub const fn next(self) -> Phase {
        Phase(self.0.saturating_add(1))
    }

    /// Returns the tempo that governs this phase.
    pub const fn tempo(self) -> Tempo {
        match self.0 {
            0 => Tempo::Long,
            1 => Tempo::Medium,
            _ => Tempo::Short,
        }
    }

    /// Consecutive matched rounds needed to leave this phase.
    #[inline]
    pub const fn hit_streak(self) -> u8 {
        self.tempo().hit_streak()
    }

    /// Time allowed for a single round of this phase, in milliseconds.
    #[inline]
    pub const fn max_span_millis(self) -> u64 {
        self.tempo().max_span_millis()
    }
}

/// How many times an LED animation should repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Repeat a specific number of times.
    Finite(u32),

    /// Repeat indefinitely.
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

/// Why a round was failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureReason {
    /// A button outside the target set was pressed.
    WrongButton,

    /// The round ran past the phase's time limit (or the clock wrapped).
    Expired,
}

/// What a single engine tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// The game was already finished; nothing happened.
    Idle,

    /// The final phase was reached on this tick and the lock was opened.
    Finished,

    /// Waiting for the confirm button; the panel is dark.
    Locked,

    /// A new round was dealt.
    RoundStarted,

    /// The round was failed and the phase restarted.
    Failed(FailureReason),

    /// The round was matched.
    Advanced {
        /// `true` if the match completed the phase's streak.
        phase_complete: bool,
    },

    /// The round is still running.
    InProgress,
}

/// Coarse, externally observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Waiting for the confirm button.
    Locked,

    /// Unlocked, but no targets dealt yet.
    Ready,

    /// A round is being played.
    RoundActive,

    /// All phases done. Terminal.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_follows_phase() {
        assert_eq!(Phase(0).tempo(), Tempo::Long);
        assert_eq!(Phase(1).tempo(), Tempo::Medium);
        assert_eq!(Phase(2).tempo(), Tempo::Short);
        assert_eq!(Phase(7).tempo(), Tempo::Short);
    }

    #[test]
    fn phase_rules_match_device_values() {
        assert_eq!(Phase(0).hit_streak(), 6);
        assert_eq!(Phase(1).hit_streak(), 4);
        assert_eq!(Phase(2).hit_streak(), 3);

        assert_eq!(Phase(0).max_span_millis(), 10_000);
        assert_eq!(Phase(1).max_span_millis(), 6_000);
        assert_eq!(Phase(2).max_span_millis(), 5_000);
    }

    #[test]
    fn next_phase_increments_by_one() {
        assert_eq!(Phase::FIRST.next(), Phase(1));
        assert_eq!(Phase(u8::MAX).next(), Phase(u8::MAX));
    }
}
