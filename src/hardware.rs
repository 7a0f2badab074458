//! Hardware seams.
//!
//! The engine drives the panel only through these traits. Implement them for
//! your LED driver and relay, or wrap a HAL pin in [`RelayPin`] /
//! [`IndicatorPin`].

use crate::colors::Color;
use embedded_hal::digital::OutputPin;

/// Trait for abstracting an addressable LED strip.
///
/// Writes are buffered until [`render`](Self::render) latches them onto the
/// LEDs. Handle any hardware errors internally - these methods cannot fail.
pub trait PixelStrip {
    /// Number of pixels on the strip.
    fn len(&self) -> usize;

    /// Buffers `color` for pixel `index`. Out-of-range indices are ignored.
    fn set_pixel(&mut self, index: usize, color: Color);

    /// Pushes the buffered frame to the LEDs.
    fn render(&mut self);

    /// Sets every buffered pixel to off without rendering.
    fn clear_all(&mut self);

    /// Returns true if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for the lock the puzzle guards.
pub trait LockActuator {
    /// Releases the lock.
    fn open(&mut self);

    /// Engages the lock. This is the power-on state.
    fn close(&mut self);
}

/// Trait for the light on the confirm button.
///
/// Lit while the panel waits for the confirm press.
pub trait PhaseIndicator {
    fn set_lit(&mut self, lit: bool);
}

/// No indicator fitted.
impl PhaseIndicator for () {
    fn set_lit(&mut self, _lit: bool) {}
}

/// Relay on a GPIO pin; driving the pin high opens the lock.
///
/// The relay is closed as soon as it is wrapped.
pub struct RelayPin<P: OutputPin> {
    pin: P,
    is_open: bool,
}

impl<P: OutputPin> RelayPin<P> {
    pub fn new(pin: P) -> Self {
        let mut relay = Self { pin, is_open: false };
        relay.close();
        relay
    }

    /// Returns true if the relay was last driven open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> LockActuator for RelayPin<P> {
    fn open(&mut self) {
        if self.pin.set_high().is_err() {
            warn!("relay pin write failed");
        }
        self.is_open = true;
    }

    fn close(&mut self) {
        if self.pin.set_low().is_err() {
            warn!("relay pin write failed");
        }
        self.is_open = false;
    }
}

/// Confirm-button light on a GPIO pin, active high.
pub struct IndicatorPin<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> IndicatorPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> PhaseIndicator for IndicatorPin<P> {
    fn set_lit(&mut self, lit: bool) {
        let result = if lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("indicator pin write failed");
        }
    }
}
