use std::io::Write;
use std::time::Duration;

use clap::Args;
use quickfit_core::{Config, Event, TimerMode};
use tokio::sync::broadcast::error::RecvError;

use super::{block_on, build_runtime, describe, render_sessions, status_line};

#[derive(Args)]
pub struct RunArgs {
    /// Timer mode: countdown or countup
    #[arg(long, default_value = "countdown")]
    mode: TimerMode,
    /// Countdown minutes (defaults to the configured countdown)
    #[arg(long)]
    minutes: Option<u64>,
    /// Extra countdown seconds
    #[arg(long)]
    seconds: Option<u64>,
    /// Disable audible cues
    #[arg(long)]
    no_sound: bool,
    /// Print the session log as JSON at exit
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn countdown_secs(&self) -> Option<u64> {
        if self.minutes.is_none() && self.seconds.is_none() {
            return None;
        }
        Some(
            self.minutes
                .unwrap_or(0)
                .saturating_mul(60)
                .saturating_add(self.seconds.unwrap_or(0)),
        )
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    block_on(run_session(args))
}

/// One session in the foreground. A countdown ends on its own; Ctrl-C stops
/// either mode (which logs a count-up run but not a countdown).
async fn run_session(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut runtime = build_runtime(&config, !args.no_sound);
    runtime.set_mode(args.mode)?;
    match (args.mode, args.countdown_secs()) {
        (TimerMode::Countdown, Some(secs)) => {
            runtime.set_value(secs)?;
        }
        (TimerMode::CountUp, Some(_)) => {
            tracing::warn!("--minutes/--seconds only apply to countdown mode");
        }
        _ => {}
    }

    let mut events = runtime.subscribe();
    runtime.start()?;
    tracing::info!(mode = %args.mode, "session running, Ctrl-C to stop");

    let mut render = tokio::time::interval(Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = render.tick() => {
                let state = runtime.state()?;
                eprint!("\r{}", status_line(&state));
                std::io::stderr().flush()?;
            }
            event = events.recv() => match event {
                Ok(event @ Event::TimerCompleted { .. }) => {
                    eprintln!("\r{}", status_line(&runtime.state()?));
                    if let Some(line) = describe(&event) {
                        eprintln!("{line}");
                    }
                    break;
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                eprintln!();
                if let Some(event) = runtime.stop()? {
                    if let Some(line) = describe(&event) {
                        eprintln!("{line}");
                    }
                }
                break;
            }
        }
    }
    runtime.shutdown();

    let sessions = runtime.sessions()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else {
        println!("{}", render_sessions(&sessions));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(minutes: Option<u64>, seconds: Option<u64>) -> RunArgs {
        RunArgs {
            mode: TimerMode::Countdown,
            minutes,
            seconds,
            no_sound: true,
            json: false,
        }
    }

    #[test]
    fn countdown_secs_combines_minutes_and_seconds() {
        assert_eq!(args(None, None).countdown_secs(), None);
        assert_eq!(args(Some(2), None).countdown_secs(), Some(120));
        assert_eq!(args(None, Some(45)).countdown_secs(), Some(45));
        assert_eq!(args(Some(1), Some(5)).countdown_secs(), Some(65));
    }
}
