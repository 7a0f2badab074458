//! Puzzle progression state machine.
//!
//! Provides [`ProgressionEngine`], which owns the game state and the current
//! round and drives the LED panel, the confirm-button light and the lock
//! through the traits in [`crate::hardware`].
//!
//! Input is only buffered: presses and unlocks are queued with
//! [`ProgressionEngine::enqueue`] (or applied with `on_press` / `on_unlock`,
//! which arm state but evaluate nothing) and every state transition happens
//! inside [`ProgressionEngine::tick`].

use crate::N_BUTTONS;
use crate::clock::PhaseClock;
use crate::colors::{COLOR_OFF, Color};
use crate::config::{ConfigError, GameConfig};
use crate::effects::{FlashTiming, Panel};
use crate::hardware::{LockActuator, PhaseIndicator, PixelStrip};
use crate::selector::{TargetSet, phase_num_targets, select_targets};
use crate::time::{TimeInstant, TimeSource};
use crate::tracker::PressTracker;
use crate::types::{ButtonIndex, EngineState, FailureReason, LoopCount, Phase, TickOutcome};
use embedded_hal::delay::DelayNs;
use heapless::Deque;
use rand::RngCore;

/// Maximum number of input events buffered between ticks.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Input delivered by the button panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A game button was pressed.
    Press(ButtonIndex),

    /// The confirm button was pressed.
    Unlock,
}

/// Errors returned by the engine's host-facing methods.
///
/// Ticks never fail; these only report rejected requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// The input queue is full; the event was dropped.
    QueueFull,

    /// The panel is waiting for the confirm button.
    Locked,

    /// The game is over.
    Finished,

    /// A target index is out of range or repeated.
    InvalidTarget(ButtonIndex),

    /// A round needs at least one target.
    EmptyRound,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::QueueFull => write!(f, "input queue is full"),
            EngineError::Locked => write!(f, "panel is locked"),
            EngineError::Finished => write!(f, "game is finished"),
            EngineError::InvalidTarget(idx) => {
                write!(f, "target {} is out of range or repeated", idx)
            }
            EngineError::EmptyRound => write!(f, "round has no targets"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Mutable game progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramState {
    pub phase: Phase,
    pub hit_streak: u8,
    pub is_finished: bool,
    pub is_locked: bool,
}

impl ProgramState {
    /// Power-on state: first phase, locked.
    pub const fn initial() -> Self {
        Self {
            phase: Phase::FIRST,
            hit_streak: 0,
            is_finished: false,
            is_locked: true,
        }
    }
}

impl Default for ProgramState {
    fn default() -> Self {
        Self::initial()
    }
}

/// The hardware an engine drives.
pub struct Board<S, L, P, D> {
    /// LED strip behind the buttons, pixel `i` lighting button `i`.
    pub strip: S,
    /// The lock.
    pub lock: L,
    /// Confirm-button light; use `()` if there is none.
    pub indicator: P,
    /// Blocking delay used by the animations.
    pub delay: D,
}

/// Runs the puzzle.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - LED strip implementation type
/// * `L` - Lock implementation type
/// * `P` - Confirm-button light implementation type
/// * `D` - Delay implementation type
/// * `R` - Random number generator type
pub struct ProgressionEngine<'t, I, T, S, L, P, D, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: PixelStrip,
    L: LockActuator,
    P: PhaseIndicator,
    D: DelayNs,
    R: RngCore,
{
    time_source: &'t T,
    panel: Panel<S>,
    lock: L,
    indicator: P,
    delay: D,
    rng: R,
    config: GameConfig,
    state: ProgramState,
    clock: PhaseClock<I>,
    targets: TargetSet,
    colors: [Option<Color>; N_BUTTONS],
    tracker: PressTracker,
    events: Deque<InputEvent, EVENT_QUEUE_CAPACITY>,
}

impl<'t, I, T, S, L, P, D, R> ProgressionEngine<'t, I, T, S, L, P, D, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: PixelStrip,
    L: LockActuator,
    P: PhaseIndicator,
    D: DelayNs,
    R: RngCore,
{
    /// Creates an engine in the power-on state: lock closed, panel dark,
    /// waiting for the confirm button.
    pub fn new(
        board: Board<S, L, P, D>,
        time_source: &'t T,
        rng: R,
        config: GameConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let Board {
            strip,
            lock,
            indicator,
            delay,
        } = board;

        let mut engine = Self {
            time_source,
            panel: Panel::new(strip, config.brightness),
            lock,
            indicator,
            delay,
            rng,
            config,
            state: ProgramState::initial(),
            clock: PhaseClock::new(),
            targets: TargetSet::new(),
            colors: [None; N_BUTTONS],
            tracker: PressTracker::new(),
            events: Deque::new(),
        };

        engine.restart();
        info!("Starting puzzle");
        Ok(engine)
    }

    /// Returns to the power-on state, closing the lock.
    pub fn restart(&mut self) {
        self.events.clear();
        self.clear_round();
        self.state = ProgramState::initial();
        self.lock.close();
        self.indicator.set_lit(true);
        self.panel.blank();
    }

    /// Queues an input event for the next tick.
    pub fn enqueue(&mut self, event: InputEvent) -> Result<(), EngineError> {
        self.events.push_back(event).map_err(|_| {
            warn!("input queue full, dropping event");
            EngineError::QueueFull
        })
    }

    /// Buffers a press of game button `idx`.
    ///
    /// Ignored while locked or finished. Nothing is evaluated until the next
    /// tick.
    pub fn on_press(&mut self, idx: ButtonIndex) {
        if self.state.is_locked || self.state.is_finished {
            return;
        }

        debug!("Press: {}", idx);
        self.tracker.record_press(idx);
    }

    /// Handles the confirm button: unlocks the panel and deals the first
    /// round of the phase.
    ///
    /// Ignored unless locked, and always ignored once finished.
    pub fn on_unlock(&mut self) {
        if !self.state.is_locked || self.state.is_finished {
            return;
        }

        info!("Phase press");
        self.state.is_locked = false;
        self.indicator.set_lit(false);
        self.begin_round();
    }

    /// Applies queued input, then evaluates the game once.
    ///
    /// Call at a fixed interval (`GameConfig::tick_interval_ms`). Animations
    /// block inside this call.
    pub fn tick(&mut self) -> TickOutcome {
        while let Some(event) = self.events.pop_front() {
            match event {
                InputEvent::Press(idx) => self.on_press(idx),
                InputEvent::Unlock => self.on_unlock(),
            }
        }

        self.evaluate()
    }

    /// Evaluates the game once, without touching the input queue.
    pub fn evaluate(&mut self) -> TickOutcome {
        if self.state.is_finished {
            return TickOutcome::Idle;
        }

        if self.state.phase.index() >= self.config.final_phase {
            self.finish();
            return TickOutcome::Finished;
        }

        if self.state.is_locked {
            self.panel.blank();
            return TickOutcome::Locked;
        }

        if !self.clock.is_active() {
            info!("First target update");
            self.begin_round();
            return TickOutcome::RoundStarted;
        }

        if self.tracker.is_error(&self.targets) {
            info!("Error: restart");
            self.fail_and_restart();
            return TickOutcome::Failed(FailureReason::WrongButton);
        }

        let now = self.time_source.now();
        if self.clock.is_expired(now, self.state.phase.max_span_millis()) {
            info!("Time expired: restart");
            self.fail_and_restart();
            return TickOutcome::Failed(FailureReason::Expired);
        }

        if self.tracker.is_match(&self.targets) {
            info!("OK: advancing progress");
            let phase_complete = self.advance();
            return TickOutcome::Advanced { phase_complete };
        }

        self.show_targets();
        TickOutcome::InProgress
    }

    /// Replaces the current round with a fixed set of targets.
    ///
    /// Colors are dealt, the press buffer is cleared and the round timer
    /// restarts, exactly as for a random round.
    pub fn load_round(&mut self, targets: &[ButtonIndex]) -> Result<(), EngineError> {
        if self.state.is_finished {
            return Err(EngineError::Finished);
        }
        if self.state.is_locked {
            return Err(EngineError::Locked);
        }
        if targets.is_empty() {
            return Err(EngineError::EmptyRound);
        }

        let targets =
            TargetSet::from_slice(targets).map_err(|(idx, _)| EngineError::InvalidTarget(idx))?;
        self.deal(targets);
        Ok(())
    }

    fn begin_round(&mut self) {
        let count = phase_num_targets(&mut self.rng, &self.config.target_range);
        let targets = select_targets(&mut self.rng, count, N_BUTTONS);
        self.deal(targets);
    }

    fn deal(&mut self, targets: TargetSet) {
        self.targets = targets;
        self.assign_colors();
        self.tracker.clear();
        self.show_targets();
        self.clock.start(self.time_source.now());
    }

    /// Gives targets a valid color and every other button an error color.
    fn assign_colors(&mut self) {
        let phase = self.state.phase;
        for (idx, slot) in self.colors.iter_mut().enumerate() {
            let is_target = self.targets.contains(idx as ButtonIndex);
            *slot = Some(self.config.palette.random_color(&mut self.rng, phase, !is_target));
        }
    }

    /// Pressed buttons and buttons without a color stay dark.
    fn show_targets(&mut self) {
        for idx in 0..N_BUTTONS {
            let color = match self.colors[idx] {
                Some(color) if !self.tracker.contains(idx as ButtonIndex) => color,
                _ => COLOR_OFF,
            };
            self.panel.paint(idx, color);
        }
        self.panel.show();
    }

    fn clear_round(&mut self) {
        self.tracker.clear();
        self.targets.clear();
        self.colors = [None; N_BUTTONS];
        self.clock.reset();
    }

    /// Waits for the confirm button again, with the panel dark.
    fn relock(&mut self) {
        self.state.is_locked = true;
        self.indicator.set_lit(true);
        self.panel.blank();
    }

    fn fail_and_restart(&mut self) {
        let timing = FlashTiming {
            cycles: self.config.flash_cycles,
            half_period_ms: self.config.flash_half_period_ms,
        };
        self.panel
            .show_error_flash(&mut self.delay, self.config.flash_color, timing);

        self.clear_round();
        self.state.hit_streak = 0;
        self.relock();
    }

    /// Counts a matched round. Returns true if it completed the phase.
    fn advance(&mut self) -> bool {
        self.state.hit_streak = self.state.hit_streak.saturating_add(1);

        if self.state.hit_streak < self.state.phase.hit_streak() {
            self.begin_round();
            return false;
        }

        self.panel.show_success_sweep(
            &mut self.delay,
            &mut self.rng,
            self.config.sweep_step_ms,
            LoopCount::Finite(1),
        );

        self.clear_round();
        self.state.hit_streak = 0;
        self.state.phase = self.state.phase.next();
        info!("Entering phase {}", self.state.phase.index());
        self.relock();
        true
    }

    fn finish(&mut self) {
        info!("Game completed");
        self.state.is_finished = true;
        self.clear_round();
        self.indicator.set_lit(false);
        self.lock.open();
        self.panel.show_success_sweep(
            &mut self.delay,
            &mut self.rng,
            self.config.sweep_step_ms,
            self.config.finale_loops,
        );
    }

    /// Returns the coarse engine state.
    pub fn state(&self) -> EngineState {
        if self.state.is_finished {
            EngineState::Finished
        } else if self.state.is_locked {
            EngineState::Locked
        } else if self.clock.is_active() {
            EngineState::RoundActive
        } else {
            EngineState::Ready
        }
    }

    /// Returns a copy of the game progress.
    #[inline]
    pub fn program_state(&self) -> ProgramState {
        self.state
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[inline]
    pub fn hit_streak(&self) -> u8 {
        self.state.hit_streak
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished
    }

    /// Targets of the current round, empty between rounds.
    #[inline]
    pub fn targets(&self) -> &[ButtonIndex] {
        self.targets.as_slice()
    }

    /// Presses recorded this round, in press order.
    #[inline]
    pub fn presses(&self) -> &[ButtonIndex] {
        self.tracker.presses()
    }

    /// Colors dealt to each button this round.
    #[inline]
    pub fn colors(&self) -> &[Option<Color>; N_BUTTONS] {
        &self.colors
    }

    /// Time since the current round was dealt.
    pub fn round_elapsed(&self) -> Option<I::Duration> {
        self.clock.elapsed(self.time_source.now())
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of events waiting for the next tick.
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn strip(&self) -> &S {
        self.panel.strip()
    }

    pub fn actuator(&self) -> &L {
        &self.lock
    }

    pub fn indicator(&self) -> &P {
        &self.indicator
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}
