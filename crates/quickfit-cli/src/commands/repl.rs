//! Line-oriented interactive shell over a [`TimerRuntime`].
//!
//! Each input line is one user gesture. `hold +1` / `release` stand in for
//! pressing and letting go of a +/- control.

use std::str::FromStr;

use quickfit_core::{Config, Event, TimerMode, TimerRuntime};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use super::{block_on, build_runtime, describe, render_sessions, status_line};

const HELP: &str = "\
commands:
  start | stop | toggle       run control
  mode [countdown|countup]    switch mode (toggles without argument)
  +N | -N                     adjust countdown by N minutes
  hold +N | hold -N           press and hold a +/- control
  release                     let go of the held control
  status                      show the timer
  sessions                    show the session log
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Toggle,
    Mode(Option<TimerMode>),
    Adjust(i64),
    Hold(i64),
    Release,
    Status,
    Sessions,
    Help,
    Quit,
}

fn parse_delta(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if !(s.starts_with('+') || s.starts_with('-')) {
        return Err(format!("expected +N or -N, got '{s}'"));
    }
    s.parse::<i64>().map_err(|e| format!("bad adjustment '{s}': {e}"))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| "empty command".to_string())?;
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments: '{line}'"));
        }
        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("start", None) => Command::Start,
            ("stop", None) => Command::Stop,
            ("toggle", None) | ("t", None) => Command::Toggle,
            ("mode", None) => Command::Mode(None),
            ("mode", Some(mode)) => Command::Mode(Some(mode.parse()?)),
            ("hold", Some(delta)) => Command::Hold(parse_delta(delta)?),
            ("release", None) => Command::Release,
            ("status", None) | ("s", None) => Command::Status,
            ("sessions", None) | ("log", None) => Command::Sessions,
            ("help", None) | ("?", None) => Command::Help,
            ("quit", None) | ("exit", None) | ("q", None) => Command::Quit,
            (word, None) if word.starts_with('+') || word.starts_with('-') => {
                Command::Adjust(parse_delta(word)?)
            }
            _ => return Err(format!("unknown command: '{line}' (try 'help')")),
        };
        Ok(command)
    }
}

pub fn run(no_sound: bool) -> Result<(), Box<dyn std::error::Error>> {
    block_on(repl(no_sound))
}

async fn repl(no_sound: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut runtime = build_runtime(&config, !no_sound);
    let mut events = runtime.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", status_line(&runtime.state()?));
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&mut runtime, command)?,
                    Err(msg) => println!("{msg}"),
                }
            }
            event = events.recv() => match event {
                // completions come from the ticker, not from a typed command
                Ok(event @ Event::TimerCompleted { .. }) => {
                    if let Some(line) = describe(&event) {
                        println!("{line}");
                    }
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }
    runtime.shutdown();
    Ok(())
}

fn execute(runtime: &mut TimerRuntime, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let event = match command {
        Command::Start => runtime.start()?,
        Command::Stop => runtime.stop()?,
        Command::Toggle => runtime.toggle()?,
        Command::Mode(Some(mode)) => runtime.set_mode(mode)?,
        Command::Mode(None) => runtime.toggle_mode()?,
        Command::Adjust(delta) => runtime.adjust(delta)?,
        Command::Hold(delta) => runtime.press_start(delta)?,
        Command::Release => {
            runtime.press_end();
            None
        }
        Command::Status => {
            println!("{}", status_line(&runtime.state()?));
            return Ok(());
        }
        Command::Sessions => {
            println!("{}", render_sessions(&runtime.sessions()?));
            return Ok(());
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };
    match event.as_ref().and_then(describe) {
        Some(line) => println!("{line}"),
        None => println!("ignored ({})", status_line(&runtime.state()?)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_control() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!(" STOP ".parse::<Command>(), Ok(Command::Stop));
        assert_eq!("t".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn parses_mode() {
        assert_eq!("mode".parse::<Command>(), Ok(Command::Mode(None)));
        assert_eq!("mode countup".parse::<Command>(), Ok(Command::Mode(Some(TimerMode::CountUp))));
        assert!("mode sideways".parse::<Command>().is_err());
    }

    #[test]
    fn parses_adjust_and_hold() {
        assert_eq!("+1".parse::<Command>(), Ok(Command::Adjust(1)));
        assert_eq!("-5".parse::<Command>(), Ok(Command::Adjust(-5)));
        assert_eq!("hold +2".parse::<Command>(), Ok(Command::Hold(2)));
        assert_eq!("hold -1".parse::<Command>(), Ok(Command::Hold(-1)));
        assert!("hold 2".parse::<Command>().is_err());
        assert!("hold".parse::<Command>().is_err());
        assert!("+x".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_noise() {
        assert!("".parse::<Command>().is_err());
        assert!("start now".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
