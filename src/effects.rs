//! Blocking LED animations.
//!
//! [`Panel`] wraps the strip with the global brightness. The animations
//! sleep on the supplied delay and return only when they are done, so the
//! caller is unresponsive for their whole duration.

use crate::colors::{COLOR_OFF, Color, random_rgb, scale_brightness};
use crate::hardware::PixelStrip;
use crate::types::LoopCount;
use embedded_hal::delay::DelayNs;
use rand::Rng;

/// Timing of the failure flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashTiming {
    /// On/off cycles.
    pub cycles: u32,
    /// Length of each on and each off half.
    pub half_period_ms: u32,
}

/// An LED strip with brightness scaling applied to every write.
pub struct Panel<S: PixelStrip> {
    strip: S,
    brightness: u8,
}

impl<S: PixelStrip> Panel<S> {
    pub fn new(strip: S, brightness: u8) -> Self {
        Self { strip, brightness }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strip.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }

    /// Buffers `color` for pixel `index`, scaled by the brightness.
    pub fn paint(&mut self, index: usize, color: Color) {
        let color = if color == COLOR_OFF {
            COLOR_OFF
        } else {
            scale_brightness(color, self.brightness)
        };
        self.strip.set_pixel(index, color);
    }

    /// Buffers `color` for every pixel.
    pub fn fill(&mut self, color: Color) {
        for index in 0..self.strip.len() {
            self.paint(index, color);
        }
    }

    pub fn show(&mut self) {
        self.strip.render();
    }

    /// Turns every pixel off and renders.
    pub fn blank(&mut self) {
        self.strip.clear_all();
        self.strip.render();
    }

    /// Flashes the whole strip `timing.cycles` times, ending dark.
    pub fn show_error_flash<D: DelayNs>(
        &mut self,
        delay: &mut D,
        color: Color,
        timing: FlashTiming,
    ) {
        for _ in 0..timing.cycles {
            self.fill(color);
            self.show();
            delay.delay_ms(timing.half_period_ms);

            self.blank();
            delay.delay_ms(timing.half_period_ms);
        }
    }

    /// Lights the pixels one by one in random colors, `step_ms` apart.
    ///
    /// With [`LoopCount::Infinite`] this never returns.
    pub fn show_success_sweep<D: DelayNs, R: Rng + ?Sized>(
        &mut self,
        delay: &mut D,
        rng: &mut R,
        step_ms: u32,
        loops: LoopCount,
    ) {
        let mut completed: u32 = 0;

        loop {
            if let LoopCount::Finite(count) = loops {
                if completed >= count {
                    return;
                }
            }

            self.strip.clear_all();
            for index in 0..self.strip.len() {
                self.paint(index, random_rgb(rng));
                self.show();
                delay.delay_ms(step_ms);
            }

            completed = completed.saturating_add(1);
        }
    }

    /// Returns the wrapped strip.
    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }
}
