//! Tokio wiring around the engine.
//!
//! [`TimerRuntime`] owns the engine behind a mutex plus the two cancelable
//! schedules: the 1 Hz ticker and the hold-to-repeat task. The ticker is
//! started on every transition to running and torn down on every transition
//! to stopped, manual or automatic. All methods must be called from within a
//! tokio runtime.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use super::clock::{Ticker, TICK_PERIOD};
use super::engine::TimerEngine;
use super::hold::{HoldController, HoldSettings};
use super::state::{TimerMode, TimerState};
use crate::error::Result;
use crate::events::Event;
use crate::session::Session;

const EVENT_CAPACITY: usize = 64;

pub struct TimerRuntime {
    engine: Arc<Mutex<TimerEngine>>,
    ticker: Ticker,
    hold: HoldController,
    events: broadcast::Sender<Event>,
}

impl TimerRuntime {
    pub fn new(engine: TimerEngine, hold: HoldSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Ticker::new(),
            hold: HoldController::new(hold),
            events,
        }
    }

    /// Events produced by commands and by the ticker (notably
    /// `TimerCompleted`, which no caller can observe otherwise).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> Result<TimerState> {
        Ok(self.engine.lock()?.state())
    }

    pub fn snapshot(&self) -> Result<Event> {
        Ok(self.engine.lock()?.snapshot())
    }

    /// Copy of the session log, newest first.
    pub fn sessions(&self) -> Result<Vec<Session>> {
        Ok(self.engine.lock()?.sessions().all().cloned().collect())
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_holding()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Option<Event>> {
        let event = self.engine.lock()?.start();
        if event.is_some() {
            self.hold.press_end();
            self.spawn_ticker();
        }
        Ok(self.publish(event))
    }

    pub fn stop(&mut self) -> Result<Option<Event>> {
        let event = self.engine.lock()?.stop();
        self.ticker.cancel();
        Ok(self.publish(event))
    }

    pub fn toggle(&mut self) -> Result<Option<Event>> {
        if self.state()?.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn adjust(&mut self, delta_minutes: i64) -> Result<Option<Event>> {
        let event = self.engine.lock()?.adjust(delta_minutes);
        Ok(self.publish(event))
    }

    pub fn set_value(&mut self, secs: u64) -> Result<Option<Event>> {
        let event = self.engine.lock()?.set_value(secs);
        Ok(self.publish(event))
    }

    pub fn set_mode(&mut self, mode: TimerMode) -> Result<Option<Event>> {
        let event = self.engine.lock()?.set_mode(mode);
        if event.is_some() {
            self.hold.press_end();
        }
        Ok(self.publish(event))
    }

    pub fn toggle_mode(&mut self) -> Result<Option<Event>> {
        let mode = self.state()?.mode().toggled();
        self.set_mode(mode)
    }

    /// Press on a +/- control: adjust once now, then arm the hold.
    ///
    /// Ignored entirely in count-up mode and while running.
    pub fn press_start(&mut self, delta_minutes: i64) -> Result<Option<Event>> {
        self.hold.press_end();
        let event = {
            let mut engine = self.engine.lock()?;
            let state = engine.state();
            if state.mode() == TimerMode::CountUp || state.is_running() {
                return Ok(None);
            }
            engine.adjust(delta_minutes)
        };

        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        self.hold.press_start(delta_minutes, move |delta| match engine.lock() {
            Ok(mut engine) => {
                if let Some(event) = engine.adjust(delta) {
                    let _ = events.send(event);
                }
            }
            Err(_) => tracing::error!("timer engine lock poisoned during hold repeat"),
        });
        Ok(self.publish(event))
    }

    pub fn press_end(&mut self) {
        self.hold.press_end();
    }

    /// Cancel every schedule. The engine keeps its state.
    pub fn shutdown(&mut self) {
        self.ticker.cancel();
        self.hold.press_end();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn spawn_ticker(&mut self) {
        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        self.ticker.start(TICK_PERIOD, move || {
            let (event, running) = match engine.lock() {
                Ok(mut engine) => {
                    let event = engine.tick();
                    (event, engine.state().is_running())
                }
                Err(_) => {
                    tracing::error!("timer engine lock poisoned, ticker stopping");
                    return ControlFlow::Break(());
                }
            };
            if let Some(event) = event {
                let _ = events.send(event);
            }
            if running {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
    }

    fn publish(&self, event: Option<Event>) -> Option<Event> {
        if let Some(ref event) = event {
            // no receivers is fine
            let _ = self.events.send(event.clone());
        }
        event
    }
}

impl Drop for TimerRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
