//! Shared test infrastructure for reflex-lock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reflex_lock::{
    Board, COLOR_OFF, Color, GameConfig, LoopCount, MillisInstant, N_BUTTONS, PhaseIndicator,
    PixelStrip, ProgressionEngine, RelayPin, TickOutcome, TimeSource,
};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock millisecond clock with controllable time advancement
pub struct MockTimeSource {
    now: Cell<u32>,
}

impl MockTimeSource {
    /// Starts at 1ms so a round dealt at boot has a non-zero start time
    pub fn new() -> Self {
        Self { now: Cell::new(1) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set_time(&self, ms: u32) {
        self.now.set(ms);
    }

    pub fn millis(&self) -> u32 {
        self.now.get()
    }
}

impl TimeSource<MillisInstant> for MockTimeSource {
    fn now(&self) -> MillisInstant {
        MillisInstant(self.now.get())
    }
}

/// Delay that moves the mock clock forward instead of sleeping
pub struct MockDelay<'a> {
    time: &'a MockTimeSource,
    pub total_ms: u64,
}

impl<'a> MockDelay<'a> {
    pub fn new(time: &'a MockTimeSource) -> Self {
        Self { time, total_ms: 0 }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.advance(ms);
        self.total_ms += ms as u64;
    }
}

// ============================================================================
// Mock Hardware
// ============================================================================

/// Mock strip that keeps the last rendered frame
pub struct MockStrip {
    buffer: [Color; N_BUTTONS],
    frame: [Color; N_BUTTONS],
    pub renders: u32,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            buffer: [COLOR_OFF; N_BUTTONS],
            frame: [COLOR_OFF; N_BUTTONS],
            renders: 0,
        }
    }

    /// What the LEDs currently show
    pub fn frame(&self) -> &[Color; N_BUTTONS] {
        &self.frame
    }

    pub fn is_dark(&self) -> bool {
        self.frame.iter().all(|&c| c == COLOR_OFF)
    }
}

impl PixelStrip for MockStrip {
    fn len(&self) -> usize {
        N_BUTTONS
    }

    fn set_pixel(&mut self, index: usize, color: Color) {
        if let Some(pixel) = self.buffer.get_mut(index) {
            *pixel = color;
        }
    }

    fn render(&mut self) {
        self.frame = self.buffer;
        self.renders += 1;
    }

    fn clear_all(&mut self) {
        self.buffer = [COLOR_OFF; N_BUTTONS];
    }
}

/// Mock GPIO pin
#[derive(Default)]
pub struct MockPin {
    pub high: bool,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockIndicator {
    pub lit: bool,
}

impl PhaseIndicator for MockIndicator {
    fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
    }
}

// ============================================================================
// Engine Helpers
// ============================================================================

pub type TestEngine<'a> = ProgressionEngine<
    'a,
    MillisInstant,
    MockTimeSource,
    MockStrip,
    RelayPin<MockPin>,
    MockIndicator,
    MockDelay<'a>,
    ChaCha8Rng,
>;

/// Device defaults, except that the finale plays once instead of forever
pub fn test_config() -> GameConfig {
    GameConfig::default().finale_loops(LoopCount::Finite(1))
}

pub fn build_engine(time: &MockTimeSource, seed: u64) -> TestEngine<'_> {
    build_engine_with(time, seed, test_config())
}

pub fn build_engine_with(time: &MockTimeSource, seed: u64, config: GameConfig) -> TestEngine<'_> {
    let board = Board {
        strip: MockStrip::new(),
        lock: RelayPin::new(MockPin::default()),
        indicator: MockIndicator::default(),
        delay: MockDelay::new(time),
    };
    ProgressionEngine::new(board, time, ChaCha8Rng::seed_from_u64(seed), config)
        .unwrap()
}

/// Presses every current target and ticks once
pub fn play_matching_round(engine: &mut TestEngine<'_>) -> TickOutcome {
    let targets: Vec<u8> = engine.targets().to_vec();
    for idx in targets {
        engine.on_press(idx);
    }
    engine.tick()
}

/// Unlocks and matches rounds until the current phase is cleared
pub fn clear_phase(engine: &mut TestEngine<'_>) {
    engine.on_unlock();
    loop {
        match play_matching_round(engine) {
            TickOutcome::Advanced {
                phase_complete: true,
            } => return,
            TickOutcome::Advanced {
                phase_complete: false,
            } => continue,
            other => panic!("unexpected outcome while clearing phase: {:?}", other),
        }
    }
}
