use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::timer::{TimerMode, TimerState};

/// Every state change in the engine produces an Event.
/// Presentation layers render from them; the runtime broadcasts them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        initial_secs: u64,
        at: DateTime<Utc>,
    },
    /// Manual stop. `session` is set when the stop logged one (count-up).
    TimerStopped {
        mode: TimerMode,
        value_secs: u64,
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero on its own.
    TimerCompleted {
        initial_secs: u64,
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    TimeAdjusted {
        delta_minutes: i64,
        value_secs: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: TimerMode,
        value_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        /// `MM:SS` of the current value.
        display: String,
        /// 0.0 ..= 1.0 progress bar fill.
        progress: f64,
        session_count: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The session this event logged, if any.
    pub fn logged_session(&self) -> Option<&Session> {
        match self {
            Event::TimerStopped { session, .. } | Event::TimerCompleted { session, .. } => {
                session.as_ref()
            }
            _ => None,
        }
    }
}
