//! # QuickFit Core Library
//!
//! This library provides the core logic for the QuickFit interval timer.
//! Presentation shells (the `quickfit` CLI today) are thin layers over it:
//! they send commands, render snapshots and never touch timer state directly.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine for countdown and
//!   count-up runs. The caller invokes `tick()` once per second.
//! - **Session Log**: most-recent-first, in-memory record of finished runs.
//! - **Hold-to-Repeat**: delayed, then periodic, adjustments while a +/-
//!   control is held.
//! - **Runtime**: tokio wiring that owns the engine and its cancelable
//!   schedules.
//! - **Storage**: TOML-based configuration. Sessions are never persisted.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerRuntime`]: Engine plus ticker and hold controller
//! - [`SessionLog`]: Logged sessions
//! - [`ToneGenerator`]: Audible cue capability
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;
pub mod tone;

pub use error::{ConfigError, CoreError, ToneError};
pub use events::Event;
pub use session::{Session, SessionLog};
pub use storage::Config;
pub use timer::{
    format_time, EngineSettings, HoldController, HoldSettings, TimerEngine, TimerMode,
    TimerRuntime, TimerState, TimerStatus,
};
pub use tone::{SilentTone, TerminalBell, ToneGenerator};
