//! Timer state value and display helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds a countdown is reset to when no other default is configured.
pub const DEFAULT_COUNTDOWN_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Countdown,
    CountUp,
}

impl TimerMode {
    /// The other mode. Used by the mode toggle button.
    pub fn toggled(self) -> Self {
        match self {
            TimerMode::Countdown => TimerMode::CountUp,
            TimerMode::CountUp => TimerMode::Countdown,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerMode::Countdown => "Countdown",
            TimerMode::CountUp => "Count Up",
        };
        write!(f, "{label}")
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "countdown" | "count-down" | "down" => Ok(TimerMode::Countdown),
            "countup" | "count-up" | "up" => Ok(TimerMode::CountUp),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Stopped,
    Running,
}

/// The whole mutable state of one timer.
///
/// Only [`TimerEngine`](super::TimerEngine) mutates it; everyone else gets
/// copies through snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub(crate) mode: TimerMode,
    /// Remaining seconds in countdown, elapsed seconds in count-up.
    pub(crate) value: u64,
    /// `value` captured when the current run started.
    pub(crate) initial_value: u64,
    pub(crate) status: TimerStatus,
    /// Set once the current run has produced its session.
    pub(crate) completion_logged: bool,
}

impl TimerState {
    /// A stopped countdown holding `countdown_secs`.
    pub fn new(countdown_secs: u64) -> Self {
        Self {
            mode: TimerMode::Countdown,
            value: countdown_secs,
            initial_value: countdown_secs,
            status: TimerStatus::Stopped,
            completion_logged: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn initial_value(&self) -> u64 {
        self.initial_value
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn completion_logged(&self) -> bool {
        self.completion_logged
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Fill level of the progress bar, 0.0 ..= 1.0.
    ///
    /// A running countdown drains from full to empty; a stopped countdown
    /// shows full and count-up always shows empty.
    pub fn progress_fraction(&self) -> f64 {
        match self.mode {
            TimerMode::CountUp => 0.0,
            TimerMode::Countdown if self.is_running() && self.initial_value > 0 => {
                (self.value as f64 / self.initial_value as f64).min(1.0)
            }
            TimerMode::Countdown => 1.0,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_and_keeps_minutes_unbounded() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(3599), "59:59");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(6001), "100:01");
    }

    #[test]
    fn default_state_is_stopped_five_minute_countdown() {
        let state = TimerState::default();
        assert_eq!(state.mode(), TimerMode::Countdown);
        assert_eq!(state.value(), 300);
        assert_eq!(state.status(), TimerStatus::Stopped);
        assert!(!state.completion_logged());
    }

    #[test]
    fn progress_fraction_rules() {
        let mut state = TimerState::new(100);
        assert_eq!(state.progress_fraction(), 1.0);

        state.status = TimerStatus::Running;
        state.value = 25;
        assert!((state.progress_fraction() - 0.25).abs() < f64::EPSILON);

        state.initial_value = 0;
        assert_eq!(state.progress_fraction(), 1.0);

        state.mode = TimerMode::CountUp;
        assert_eq!(state.progress_fraction(), 0.0);
        state.status = TimerStatus::Stopped;
        assert_eq!(state.progress_fraction(), 0.0);
    }

    #[test]
    fn mode_parses_and_displays() {
        assert_eq!("countdown".parse::<TimerMode>(), Ok(TimerMode::Countdown));
        assert_eq!("Count-Up".parse::<TimerMode>(), Ok(TimerMode::CountUp));
        assert_eq!("up".parse::<TimerMode>(), Ok(TimerMode::CountUp));
        assert!("sideways".parse::<TimerMode>().is_err());
        assert_eq!(TimerMode::CountUp.to_string(), "Count Up");
        assert_eq!(TimerMode::Countdown.toggled(), TimerMode::CountUp);
    }

    #[test]
    fn state_serializes_lowercase_enums() {
        let json = serde_json::to_value(TimerState::default()).unwrap();
        assert_eq!(json["mode"], "countdown");
        assert_eq!(json["status"], "stopped");
        assert_eq!(json["value"], 300);
    }
}
