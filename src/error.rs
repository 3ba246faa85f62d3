//! Error types for session access and per-channel analysis.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a session or analyzing a channel.
///
/// Only [`Error::SessionUnavailable`] and [`Error::Config`] are fatal for a
/// batch run. Everything else is scoped to the channel being analyzed and is
/// logged by the driver before it moves on.
#[derive(Debug, Error)]
pub enum Error {
    /// The recorded session could not be located or opened.
    #[error("Session unavailable at {}: {source}", path.display())]
    SessionUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload does not carry the generation timestamp field.
    #[error("Channel {channel}: payload has no timestamp at '{field}'")]
    FieldMissing { channel: String, field: String },

    /// A session line is not a valid record.
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize a report.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration (channel table, settings file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO failure after the session was opened, or while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error should abort the whole batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::SessionUnavailable { .. } | Error::Config(_))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
