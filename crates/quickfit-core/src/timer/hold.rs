//! Press-and-hold repeat for the +/- controls.
//!
//! The immediate adjustment on press belongs to the caller. This controller
//! only owns what happens afterwards: after `delay` it starts calling the
//! repeat action every `repeat_interval` until the press ends.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::storage::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSettings {
    pub delay: Duration,
    pub repeat_interval: Duration,
}

impl Default for HoldSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            repeat_interval: Duration::from_millis(200),
        }
    }
}

impl From<&Config> for HoldSettings {
    fn from(config: &Config) -> Self {
        Self {
            delay: Duration::from_millis(config.hold.delay_ms),
            repeat_interval: Duration::from_millis(config.hold.repeat_interval_ms.max(1)),
        }
    }
}

/// At most one hold sequence is active at a time.
#[derive(Debug, Default)]
pub struct HoldController {
    settings: HoldSettings,
    task: Option<JoinHandle<()>>,
}

impl HoldController {
    pub fn new(settings: HoldSettings) -> Self {
        Self {
            settings,
            task: None,
        }
    }

    pub fn settings(&self) -> HoldSettings {
        self.settings
    }

    /// Arm a hold for `delta`. Any previous hold is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn press_start<F>(&mut self, delta: i64, mut repeat: F)
    where
        F: FnMut(i64) + Send + 'static,
    {
        self.press_end();
        let HoldSettings {
            delay,
            repeat_interval,
        } = self.settings;
        tracing::debug!(delta, ?delay, "hold armed");
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut ticks = tokio::time::interval_at(Instant::now() + repeat_interval, repeat_interval);
            loop {
                ticks.tick().await;
                repeat(delta);
            }
        }));
    }

    /// Cancel the pending activation and any active repeat. Idempotent.
    pub fn press_end(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("hold released");
        }
    }

    pub fn is_holding(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for HoldController {
    fn drop(&mut self) {
        self.press_end();
    }
}
