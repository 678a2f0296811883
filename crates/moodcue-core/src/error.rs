//! Core error types for moodcue-core.
//!
//! The taxonomy mirrors the recovery policy: a missing mood signal is fatal
//! for the whole aggregation, a malformed boundary row is skipped locally,
//! and collaborator fetch failures surface as service-level errors from the
//! `sources` module only.

use std::path::PathBuf;
use thiserror::Error;

use crate::mood::SignalKind;

/// Core error type for moodcue-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required mood signal was absent
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    /// A malformed boundary record
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collaborator fetch errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

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

/// Signal-level errors. Fatal: no partial mood set is ever produced, and no
/// default is silently substituted for an absent signal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// A required mood source reported nothing
    #[error("missing required mood signal: {signal}")]
    Missing { signal: SignalKind },
}

/// Row-level errors for boundary records (calendar events, catalog rows).
/// Recovered locally: the offending row is skipped with a warning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A required field was absent or empty
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// A timestamp could not be parsed as ISO-8601
    #[error("unparsable timestamp '{value}'")]
    BadTimestamp { value: String },

    /// A numeric field was neither a number nor a numeric string
    #[error("unparsable number {value} for '{field}'")]
    BadNumber { field: &'static str, value: String },

    /// Invalid time range
    #[error("invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::FixedOffset>,
        end: chrono::DateTime<chrono::FixedOffset>,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The platform config directory could not be resolved
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Collaborator fetch errors. The core computation never initiates a fetch;
/// these only escape the `sources` clients.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The collaborator endpoint URL could not be built
    #[error("invalid endpoint for '{service}': {message}")]
    InvalidEndpoint {
        service: &'static str,
        message: String,
    },

    /// The collaborator was unreachable or returned an error status
    #[error("upstream service '{service}' unavailable: {source}")]
    Upstream {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The collaborator answered with an unusable payload
    #[error("upstream service '{service}' returned malformed payload: {message}")]
    BadPayload {
        service: &'static str,
        message: String,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
