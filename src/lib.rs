#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ProgressionEngine`**: The puzzle state machine; call `tick()` at a fixed interval
//! - **`InputEvent`**: A game-button press or a confirm-button press, queued for the next tick
//! - **`Phase`** / **`Tempo`**: Difficulty tiers setting streak length and round time limit
//! - **`ColorPalette`**: Five colors split per phase into valid and error classes
//! - **`PressTracker`**: Distinct presses of the current round, checked against the targets
//! - **`PhaseClock`**: Round start time and expiry check
//! - **`PixelStrip`**, **`LockActuator`**, **`PhaseIndicator`**: Hardware traits to implement
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`GameConfig`**: Tunable constants, validated when the engine is built
//!
//! Animations block on an `embedded_hal::delay::DelayNs` inside `tick()`, and
//! randomness comes from any `rand::RngCore`.

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

pub mod buffer;
pub mod clock;
pub mod colors;
pub mod config;
pub mod effects;
pub mod engine;
pub mod hardware;
pub mod selector;
pub mod time;
pub mod tracker;
pub mod types;

pub use buffer::ButtonSet;
pub use clock::PhaseClock;
pub use colors::{COLOR_OFF, Color, ColorPalette};
pub use config::{ConfigError, GameConfig};
pub use engine::{Board, EngineError, InputEvent, ProgramState, ProgressionEngine};
pub use hardware::{IndicatorPin, LockActuator, PhaseIndicator, PixelStrip, RelayPin};
pub use selector::{TargetSet, select_targets};
pub use time::{Millis, MillisInstant, TimeDuration, TimeInstant, TimeSource};
pub use tracker::PressTracker;
pub use types::{
    ButtonIndex, EngineState, FailureReason, LoopCount, Phase, Tempo, TickOutcome,
};

/// Number of game buttons on the panel.
pub const N_BUTTONS: usize = 8;

/// Reaching this phase finishes the game.
pub const FINAL_PHASE: u8 = 3;

/// Interval at which the host should call `ProgressionEngine::tick`.
pub const TICK_INTERVAL_MS: u32 = 50;
