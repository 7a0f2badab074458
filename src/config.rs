//! Tunable game constants.

use crate::colors::{COLOR_RED, Color, ColorPalette};
use crate::types::LoopCount;
use crate::{FINAL_PHASE, N_BUTTONS, TICK_INTERVAL_MS};
use core::ops::Range;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The final phase must be at least 1.
    InvalidFinalPhase,

    /// The target count range is empty or starts at zero.
    InvalidTargetRange { min: u8, max: u8 },

    /// A tempo's error set is empty or covers the whole palette.
    EmptyColorClass { phase: u8 },

    /// A tempo's error set names a color outside the palette.
    ColorIndexOutOfRange { phase: u8 },

    /// An animation or tick period is zero.
    ZeroDuration,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidFinalPhase => {
                write!(f, "final phase must be at least 1")
            }
            ConfigError::InvalidTargetRange { min, max } => {
                write!(f, "invalid target count range {}..{}", min, max)
            }
            ConfigError::EmptyColorClass { phase } => {
                write!(
                    f,
                    "phase {} needs at least one valid and one error color",
                    phase
                )
            }
            ConfigError::ColorIndexOutOfRange { phase } => {
                write!(f, "phase {} error set references a missing color", phase)
            }
            ConfigError::ZeroDuration => {
                write!(f, "animation and tick periods must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Game configuration.
///
/// `Default` reproduces the reference panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Reaching this phase finishes the game.
    pub final_phase: u8,

    /// Number of targets per round, drawn uniformly from this half-open range.
    pub target_range: Range<u8>,

    /// Phase colors.
    pub palette: ColorPalette,

    /// On/off cycles of the failure flash.
    pub flash_cycles: u32,

    /// Duration of each on and each off half of a flash cycle.
    pub flash_half_period_ms: u32,

    /// Flash color.
    pub flash_color: Color,

    /// Time each pixel holds in the success sweep.
    pub sweep_step_ms: u32,

    /// Sweep repetitions played once the last phase is cleared.
    pub finale_loops: LoopCount,

    /// Global strip brightness, 0-255.
    pub brightness: u8,

    /// Period at which the host is expected to call `tick()`.
    ///
    /// Advisory only: the engine never reads it, the host's main loop
    /// uses it to pace ticks.
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            final_phase: FINAL_PHASE,
            target_range: 5..7,
            palette: ColorPalette::device(),
            flash_cycles: 3,
            flash_half_period_ms: 250,
            flash_color: COLOR_RED,
            sweep_step_ms: 250,
            finale_loops: LoopCount::Infinite,
            brightness: 200,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Sets the final phase.
    pub fn final_phase(mut self, phase: u8) -> Self {
        self.final_phase = phase;
        self
    }

    /// Sets the target count range.
    pub fn target_range(mut self, range: Range<u8>) -> Self {
        self.target_range = range;
        self
    }

    /// Sets the palette.
    pub fn palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets how many times the success sweep repeats after the last phase.
    pub fn finale_loops(mut self, loops: LoopCount) -> Self {
        self.finale_loops = loops;
        self
    }

    /// Sets the global brightness.
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Validates the configuration.
    ///
    /// A target range whose upper end exceeds the button count is accepted;
    /// it is clamped when targets are drawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.final_phase == 0 {
            return Err(ConfigError::InvalidFinalPhase);
        }

        let Range { start, end } = self.target_range;
        if start == 0 || start >= end {
            return Err(ConfigError::InvalidTargetRange {
                min: start,
                max: end,
            });
        }

        if self.flash_half_period_ms == 0
            || self.sweep_step_ms == 0
            || self.tick_interval_ms == 0
        {
            return Err(ConfigError::ZeroDuration);
        }

        self.palette.validate()
    }

    /// Returns true if the target range fits the panel.
    #[inline]
    pub fn target_range_fits(&self) -> bool {
        self.target_range.end as usize <= N_BUTTONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::DEVICE_COLORS;
    extern crate std;
    use std::format;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.final_phase, 3);
        assert_eq!(config.target_range, 5..7);
        assert_eq!(config.finale_loops, LoopCount::Infinite);
        assert!(config.target_range_fits());
    }

    #[test]
    fn rejects_zero_final_phase() {
        let config = GameConfig::default().final_phase(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidFinalPhase));
    }

    #[test]
    fn rejects_empty_target_range() {
        let config = GameConfig::default().target_range(4..4);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTargetRange { min: 4, max: 4 })
        );

        let config = GameConfig::default().target_range(0..3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_range_validates_but_does_not_fit() {
        let config = GameConfig::default().target_range(5..12);
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.target_range_fits());
    }

    #[test]
    fn rejects_palette_without_error_colors() {
        let palette = ColorPalette::new(DEVICE_COLORS, [&[3], &[], &[2]]);
        let config = GameConfig::default().palette(palette);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyColorClass { phase: 1 })
        );
    }

    #[test]
    fn rejects_zero_durations() {
        let mut config = GameConfig::default();
        config.sweep_step_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));

        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn error_messages_format_correctly_for_display() {
        let msg = format!("{}", ConfigError::InvalidTargetRange { min: 7, max: 5 });
        assert!(msg.contains("7..5"));

        let msg = format!("{}", ConfigError::EmptyColorClass { phase: 2 });
        assert!(msg.contains("phase 2"));
    }
}
