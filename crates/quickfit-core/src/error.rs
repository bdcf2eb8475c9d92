//! Core error types for quickfit-core.
//!
//! The timer state machine itself never fails: rejected commands are no-ops.
//! These types cover what sits around it (configuration, audio output and
//! the shared engine lock).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quickfit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The engine mutex was poisoned by a panicking holder
    #[error("Timer engine lock poisoned")]
    LockPoisoned,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The config directory could not be resolved or created
    #[error("Config directory unavailable: {0}")]
    NoDataDir(String),
}

/// Audio cue errors. Never escape the engine.
#[derive(Error, Debug)]
pub enum ToneError {
    /// No usable output device
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// Writing the cue failed
    #[error("Failed to emit cue: {0}")]
    Io(#[from] std::io::Error),
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoreError::LockPoisoned
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
