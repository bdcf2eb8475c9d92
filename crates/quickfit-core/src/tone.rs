//! Audible cues.
//!
//! The engine only knows the [`ToneGenerator`] capability. Failures are
//! reported back to it so they can be logged, never propagated.

use std::io::Write;
use std::time::Duration;

use crate::error::ToneError;

/// Emits the two cues the timer uses.
pub trait ToneGenerator: Send {
    /// Short beep for the final seconds of a countdown.
    fn play_tick(&self) -> Result<(), ToneError>;

    /// Multi-pulse chirp for an auto-completed countdown.
    fn play_completion(&self) -> Result<(), ToneError>;
}

/// Plays nothing. Used when sound is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTone;

impl ToneGenerator for SilentTone {
    fn play_tick(&self) -> Result<(), ToneError> {
        Ok(())
    }

    fn play_completion(&self) -> Result<(), ToneError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr.
///
/// Completion pulses after the first are spaced on the tokio runtime when one
/// is available, so the caller never waits for them.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    completion_pulses: u32,
    pulse_spacing: Duration,
}

impl TerminalBell {
    pub fn new(completion_pulses: u32, pulse_spacing: Duration) -> Self {
        Self {
            completion_pulses: completion_pulses.max(1),
            pulse_spacing,
        }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

impl ToneGenerator for TerminalBell {
    fn play_tick(&self) -> Result<(), ToneError> {
        ring()
    }

    fn play_completion(&self) -> Result<(), ToneError> {
        ring()?;
        let remaining = self.completion_pulses - 1;
        if remaining == 0 {
            return Ok(());
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let spacing = self.pulse_spacing;
                handle.spawn(async move {
                    for _ in 0..remaining {
                        tokio::time::sleep(spacing).await;
                        if let Err(err) = ring() {
                            tracing::warn!(%err, "completion pulse failed");
                            break;
                        }
                    }
                });
                Ok(())
            }
            Err(_) => {
                for _ in 0..remaining {
                    ring()?;
                }
                Ok(())
            }
        }
    }
}

fn ring() -> Result<(), ToneError> {
    let mut out = std::io::stderr().lock();
    out.write_all(b"\x07")?;
    out.flush()?;
    Ok(())
}
