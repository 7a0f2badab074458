//! Phase color palette and color helpers.
//!
//! Every phase splits the five palette entries into "valid" colors, which
//! mark the buttons to press, and "error" colors, which mark the buttons to
//! avoid. Which entries are errors depends on the phase's [`Tempo`].
//!
//! Colors are 8-bit `palette::Srgb<u8>` values, matching what addressable
//! LED strips consume.

use crate::config::ConfigError;
use crate::types::{Phase, Tempo};
use palette::{LinSrgb, Srgb};
use rand::Rng;

/// A 24-bit RGB pixel color.
pub type Color = Srgb<u8>;

/// Pixel off.
pub const COLOR_OFF: Color = Srgb::new(0, 0, 0);

/// Pure red, used for the failure flash.
pub const COLOR_RED: Color = Srgb::new(255, 0, 0);

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 5;

/// Upper bound on rejection-sampling attempts in [`ColorPalette::random_color`].
pub const MAX_COLOR_DRAWS: usize = 64;

/// Palette entries as wired on the reference panel, before gamma correction.
pub const DEVICE_COLORS: [Color; PALETTE_SIZE] = [
    Srgb::new(0, 255, 0),     // green
    Srgb::new(255, 255, 0),   // yellow
    Srgb::new(255, 0, 0),     // red
    Srgb::new(0, 0, 255),     // blue
    Srgb::new(255, 255, 255), // white
];

/// Error entries for `Tempo::Long`, `Tempo::Medium` and `Tempo::Short`.
pub const DEVICE_ERROR_SETS: [&[u8]; 3] = [
    &[3],       // blue
    &[1, 2],    // yellow, red
    &[2, 3, 4], // red, blue, white
];

/// Packs a color into a `0xRRGGBB` value.
#[inline]
pub fn to_rgb24(color: Color) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Maps a perceptual color onto LED drive levels.
///
/// LED brightness is linear in duty cycle, so the sRGB-encoded value is
/// decoded to linear light and the result is used as the new drive level.
pub fn gamma_correct(color: Color) -> Color {
    let linear: LinSrgb<f32> = color.into_format::<f32>().into_linear();
    Srgb::new(linear.red, linear.green, linear.blue).into_format()
}

/// Scales every channel by `brightness / 255`, rounding towards zero.
#[inline]
pub fn scale_brightness(color: Color, brightness: u8) -> Color {
    let scale = |c: u8| ((c as u16 * (brightness as u16 + 1)) >> 8) as u8;
    Srgb::new(scale(color.red), scale(color.green), scale(color.blue))
}

/// Draws a color with each channel uniform in `[0, 255)`.
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Srgb::new(
        rng.gen_range(0..255),
        rng.gen_range(0..255),
        rng.gen_range(0..255),
    )
}

/// The five-color palette together with its per-tempo error classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    colors: [Color; PALETTE_SIZE],
    error_sets: [&'static [u8]; 3],
}

impl ColorPalette {
    /// Creates a palette. Call [`validate`](Self::validate) before drawing from it.
    pub const fn new(colors: [Color; PALETTE_SIZE], error_sets: [&'static [u8]; 3]) -> Self {
        Self { colors, error_sets }
    }

    /// The reference panel's palette, gamma-corrected.
    pub fn device() -> Self {
        Self::new(DEVICE_COLORS.map(gamma_correct), DEVICE_ERROR_SETS)
    }

    /// Checks that every tempo has at least one valid and one error color.
    ///
    /// Both classes must be non-empty for [`random_color`](Self::random_color)
    /// to honor the requested class.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (tempo_idx, set) in self.error_sets.iter().enumerate() {
            let phase = tempo_idx as u8;
            if set.iter().any(|&idx| idx as usize >= PALETTE_SIZE) {
                return Err(ConfigError::ColorIndexOutOfRange { phase });
            }
            let errors = (0..PALETTE_SIZE)
                .filter(|&idx| set.contains(&(idx as u8)))
                .count();
            if errors == 0 || errors == PALETTE_SIZE {
                return Err(ConfigError::EmptyColorClass { phase });
            }
        }
        Ok(())
    }

    /// Returns the palette entry at `index`.
    #[inline]
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    fn error_set(&self, phase: Phase) -> &[u8] {
        match phase.tempo() {
            Tempo::Long => self.error_sets[0],
            Tempo::Medium => self.error_sets[1],
            Tempo::Short => self.error_sets[2],
        }
    }

    /// Returns true if palette entry `index` is an error color during `phase`.
    #[inline]
    pub fn is_error_color(&self, phase: Phase, index: usize) -> bool {
        self.error_set(phase)
            .iter()
            .any(|&idx| idx as usize == index)
    }

    /// Returns true if `color` belongs to the error class during `phase`.
    pub fn is_error(&self, phase: Phase, color: Color) -> bool {
        self.colors
            .iter()
            .position(|&c| c == color)
            .is_some_and(|idx| self.is_error_color(phase, idx))
    }

    /// Draws a palette index whose class during `phase` matches `want_error`.
    ///
    /// Uniform rejection sampling, capped at [`MAX_COLOR_DRAWS`] attempts.
    /// Past the cap the first index of the requested class is returned.
    pub fn random_index<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        phase: Phase,
        want_error: bool,
    ) -> usize {
        for _ in 0..MAX_COLOR_DRAWS {
            let idx = rng.gen_range(0..PALETTE_SIZE);
            if self.is_error_color(phase, idx) == want_error {
                return idx;
            }
        }

        warn!("color draw cap hit, falling back to scan");
        (0..PALETTE_SIZE)
            .find(|&idx| self.is_error_color(phase, idx) == want_error)
            .unwrap_or(0)
    }

    /// Draws a color whose class during `phase` matches `want_error`.
    pub fn random_color<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        phase: Phase,
        want_error: bool,
    ) -> Color {
        self.colors[self.random_index(rng, phase, want_error)]
    }

    /// Draws a color marking a target button.
    #[inline]
    pub fn random_valid<R: Rng + ?Sized>(&self, rng: &mut R, phase: Phase) -> Color {
        self.random_color(rng, phase, false)
    }

    /// Draws a color marking a button to avoid.
    #[inline]
    pub fn random_error<R: Rng + ?Sized>(&self, rng: &mut R, phase: Phase) -> Color {
        self.random_color(rng, phase, true)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::device()
    }
}
