//! In-memory session log.
//!
//! Sessions are kept most-recent-first and live only as long as the
//! process. Nothing here is written to disk.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timer::{format_time, TimerMode};

/// One logged run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub completed_at: DateTime<Local>,
    /// Locale date, e.g. `10/19/26`.
    pub completed_at_date: String,
    /// Locale time, e.g. `14:03:11`.
    pub completed_at_time: String,
    /// `MM:SS` rendering of `duration_secs`.
    pub duration_label: String,
    pub duration_secs: u64,
    pub mode: TimerMode,
}

impl Session {
    pub fn new(mode: TimerMode, duration_secs: u64, completed_at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at_date: completed_at.format("%x").to_string(),
            completed_at_time: completed_at.format("%X").to_string(),
            completed_at,
            duration_label: format_time(duration_secs),
            duration_secs,
            mode,
        }
    }
}

/// Append-only, most-recent-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    entries: VecDeque<Session>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head. No dedup and no cap.
    pub fn append(&mut self, session: Session) {
        self.entries.push_front(session);
    }

    /// Every session, newest first.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Session> + DoubleEndedIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Session> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
