//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not own any threads:
//! the caller invokes `tick()` once per second while the timer runs (see
//! [`TimerRuntime`](super::TimerRuntime) for the tokio wiring).
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --start()--> Running --stop()--> Stopped
//!                      Running --tick() reaches 0 (countdown)--> Stopped
//! ```
//!
//! Mode changes and adjustments are only accepted while stopped. Commands
//! that are not allowed in the current state return `None` and change
//! nothing.
//!
//! ## Session logging
//!
//! A countdown logs a session only when it runs out on its own. A count-up
//! logs one only when it is stopped by hand. Either way at most one session
//! is logged per run.

use std::fmt;

use chrono::Utc;

use super::clock::{SystemClock, WallClock};
use super::state::{format_time, TimerMode, TimerState, TimerStatus, DEFAULT_COUNTDOWN_SECS};
use crate::events::Event;
use crate::session::{Session, SessionLog};
use crate::storage::Config;
use crate::tone::{SilentTone, ToneGenerator};

/// Tunables read by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Value a countdown is reset to on mode switch and at startup.
    pub countdown_default_secs: u64,
    /// Tick cue plays while `threshold >= value > 1`.
    pub tick_cue_threshold_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            countdown_default_secs: DEFAULT_COUNTDOWN_SECS,
            tick_cue_threshold_secs: 5,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            countdown_default_secs: config.timer.countdown_default_secs,
            tick_cue_threshold_secs: config.timer.tick_cue_threshold_secs,
        }
    }
}

/// Core timer engine.
///
/// Owns the [`TimerState`] and the [`SessionLog`]; both are only changed
/// through the commands below.
pub struct TimerEngine {
    state: TimerState,
    log: SessionLog,
    settings: EngineSettings,
    tone: Box<dyn ToneGenerator>,
    clock: Box<dyn WallClock>,
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("sessions", &self.log.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl TimerEngine {
    /// A stopped countdown at the configured default, silent, on the system clock.
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            state: TimerState::new(settings.countdown_default_secs),
            log: SessionLog::new(),
            settings,
            tone: Box::new(SilentTone),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_tone(mut self, tone: impl ToneGenerator + 'static) -> Self {
        self.tone = Box::new(tone);
        self
    }

    pub fn with_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn sessions(&self) -> &SessionLog {
        &self.log
    }

    pub fn progress_fraction(&self) -> f64 {
        self.state.progress_fraction()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            display: format_time(self.state.value),
            progress: self.state.progress_fraction(),
            session_count: self.log.len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running() {
            return None;
        }
        self.state.initial_value = self.state.value;
        self.state.completion_logged = false;
        self.state.status = TimerStatus::Running;
        tracing::debug!(mode = ?self.state.mode, value = self.state.value, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            initial_secs: self.state.initial_value,
            at: Utc::now(),
        })
    }

    /// Manual stop. Only a count-up run is logged here.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.state.is_running() {
            return None;
        }
        let session = if self.state.mode == TimerMode::CountUp && !self.state.completion_logged {
            Some(self.log_session(self.state.value))
        } else {
            None
        };
        self.state.status = TimerStatus::Stopped;
        tracing::debug!(mode = ?self.state.mode, value = self.state.value, "timer stopped");
        Some(Event::TimerStopped {
            mode: self.state.mode,
            value_secs: self.state.value,
            session,
            at: Utc::now(),
        })
    }

    /// The play/pause button: start when stopped, stop when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Advance one second. Returns `Some(Event::TimerCompleted)` when a
    /// countdown runs out; ignored while stopped.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.is_running() {
            return None;
        }
        match self.state.mode {
            TimerMode::CountUp => {
                self.state.value = self.state.value.saturating_add(1);
                None
            }
            TimerMode::Countdown => {
                let value = self.state.value;
                if value <= 1 {
                    return Some(self.complete());
                }
                if value <= self.settings.tick_cue_threshold_secs {
                    if let Err(err) = self.tone.play_tick() {
                        tracing::warn!(%err, "tick cue failed");
                    }
                }
                self.state.value = value - 1;
                None
            }
        }
    }

    /// Shift a stopped countdown by whole minutes, never below zero.
    pub fn adjust(&mut self, delta_minutes: i64) -> Option<Event> {
        if !self.accepts_adjustment() {
            return None;
        }
        let delta_secs = delta_minutes.unsigned_abs().saturating_mul(60);
        self.state.value = if delta_minutes >= 0 {
            self.state.value.saturating_add(delta_secs)
        } else {
            self.state.value.saturating_sub(delta_secs)
        };
        tracing::debug!(delta_minutes, value = self.state.value, "time adjusted");
        Some(Event::TimeAdjusted {
            delta_minutes,
            value_secs: self.state.value,
            at: Utc::now(),
        })
    }

    /// Set a stopped countdown to an exact number of seconds.
    ///
    /// Gated exactly like [`adjust`](Self::adjust).
    pub fn set_value(&mut self, secs: u64) -> Option<Event> {
        if !self.accepts_adjustment() {
            return None;
        }
        self.state.value = secs;
        Some(Event::TimeAdjusted {
            delta_minutes: 0,
            value_secs: secs,
            at: Utc::now(),
        })
    }

    /// Switch mode while stopped, resetting the value to the mode default.
    pub fn set_mode(&mut self, mode: TimerMode) -> Option<Event> {
        if self.state.is_running() {
            return None;
        }
        self.state.mode = mode;
        self.state.value = match mode {
            TimerMode::Countdown => self.settings.countdown_default_secs,
            TimerMode::CountUp => 0,
        };
        self.state.completion_logged = false;
        tracing::debug!(?mode, value = self.state.value, "mode changed");
        Some(Event::ModeChanged {
            mode,
            value_secs: self.state.value,
            at: Utc::now(),
        })
    }

    pub fn toggle_mode(&mut self) -> Option<Event> {
        self.set_mode(self.state.mode.toggled())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn accepts_adjustment(&self) -> bool {
        self.state.mode == TimerMode::Countdown && !self.state.is_running()
    }

    fn complete(&mut self) -> Event {
        let session = if self.state.completion_logged {
            None
        } else {
            if let Err(err) = self.tone.play_completion() {
                tracing::warn!(%err, "completion cue failed");
            }
            Some(self.log_session(self.state.initial_value))
        };
        self.state.value = 0;
        self.state.status = TimerStatus::Stopped;
        Event::TimerCompleted {
            initial_secs: self.state.initial_value,
            session,
            at: Utc::now(),
        }
    }

    fn log_session(&mut self, duration_secs: u64) -> Session {
        let session = Session::new(self.state.mode, duration_secs, self.clock.now());
        self.log.append(session.clone());
        self.state.completion_logged = true;
        tracing::info!(
            mode = ?session.mode,
            duration = %session.duration_label,
            "session logged"
        );
        session
    }
}
