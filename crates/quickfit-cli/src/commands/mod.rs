pub mod config;
pub mod repl;
pub mod run;

use std::time::Duration;

use quickfit_core::{
    format_time, Config, EngineSettings, Event, HoldSettings, Session, TerminalBell, TimerEngine,
    TimerRuntime, TimerState,
};

/// Engine and schedules configured from `config`. `sound` can only turn
/// cues off, never on against the config.
pub(crate) fn build_runtime(config: &Config, sound: bool) -> TimerRuntime {
    let engine = TimerEngine::new(EngineSettings::from(config));
    let engine = if sound && config.sound.enabled {
        engine.with_tone(TerminalBell::new(
            config.sound.completion_pulses,
            Duration::from_millis(config.sound.pulse_spacing_ms),
        ))
    } else {
        engine
    };
    TimerRuntime::new(engine, HoldSettings::from(config))
}

/// Block on `future` with a fresh multi-thread runtime.
pub(crate) fn block_on<F, T>(future: F) -> Result<T, Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<T, Box<dyn std::error::Error>>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

const BAR_WIDTH: usize = 20;

/// One-line rendering: `Countdown  04:59  [###################-]`.
pub(crate) fn status_line(state: &TimerState) -> String {
    let filled = (state.progress_fraction() * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let marker = if state.is_running() { ">" } else { "|" };
    format!(
        "{marker} {:<10} {}  [{}{}]",
        state.mode().to_string(),
        format_time(state.value()),
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
    )
}

pub(crate) fn render_sessions(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return "No sessions yet".to_string();
    }
    sessions
        .iter()
        .map(|s| {
            format!(
                "{}  {:<10} {} {}",
                s.duration_label,
                s.mode.to_string(),
                s.completed_at_date,
                s.completed_at_time
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn describe(event: &Event) -> Option<String> {
    match event {
        Event::TimerCompleted { session, .. } => Some(match session {
            Some(s) => format!("done: {} countdown logged", s.duration_label),
            None => "done".to_string(),
        }),
        Event::TimerStopped { session: Some(s), .. } => {
            Some(format!("stopped: {} logged", s.duration_label))
        }
        Event::TimerStopped { value_secs, .. } => {
            Some(format!("stopped at {} (not logged)", format_time(*value_secs)))
        }
        Event::TimerStarted { mode, initial_secs, .. } => {
            Some(format!("started {mode} at {}", format_time(*initial_secs)))
        }
        Event::ModeChanged { mode, value_secs, .. } => {
            Some(format!("mode: {mode} ({})", format_time(*value_secs)))
        }
        Event::TimeAdjusted { value_secs, .. } => Some(format!("set to {}", format_time(*value_secs))),
        Event::StateSnapshot { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickfit_core::TimerMode;

    #[test]
    fn status_line_shows_full_bar_when_stopped() {
        let engine = TimerEngine::default();
        let line = status_line(&engine.state());
        assert!(line.contains("05:00"));
        assert!(line.contains(&"#".repeat(BAR_WIDTH)));
        assert!(line.starts_with('|'));
    }

    #[test]
    fn status_line_shows_empty_bar_in_countup() {
        let mut engine = TimerEngine::default();
        engine.set_mode(TimerMode::CountUp);
        engine.start();
        let line = status_line(&engine.state());
        assert!(line.starts_with('>'));
        assert!(line.contains("Count Up"));
        assert!(line.contains(&"-".repeat(BAR_WIDTH)));
    }

    #[test]
    fn empty_log_message() {
        assert_eq!(render_sessions(&[]), "No sessions yet");
    }

    #[test]
    fn describes_logged_stop() {
        let mut engine = TimerEngine::default();
        engine.set_mode(TimerMode::CountUp);
        engine.start();
        engine.tick();
        let event = engine.stop().unwrap();
        assert_eq!(describe(&event).as_deref(), Some("stopped: 00:01 logged"));
    }
}
