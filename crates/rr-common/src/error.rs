//! Error types for Record Router.

use thiserror::Error;

/// Result type alias for Record Router operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Record Router.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid duration for {field}: {reason}")]
    InvalidDuration { field: String, reason: String },

    // Source log errors (20-29)
    #[error("source log unavailable: {0}")]
    SourceUnavailable(String),

    #[error("checksum failed: {0}")]
    Checksum(String),

    #[error("seek to offset {offset} failed: {reason}")]
    Seek { offset: u64, reason: String },

    // Record errors (30-39)
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    // Routing errors (40-49)
    #[error("no filter configured for event type {event_type}")]
    MissingFilter { event_type: String },

    #[error("unsupported filter for event type {event_type}")]
    UnsupportedFilter { event_type: String },

    #[error("write to {path} failed: {reason}")]
    Write { path: String, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used when reporting failures in machine-readable output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidDuration { .. } => 11,
            Error::SourceUnavailable(_) => 20,
            Error::Checksum(_) => 21,
            Error::Seek { .. } => 22,
            Error::MalformedRecord(_) => 30,
            Error::MissingFilter { .. } => 40,
            Error::UnsupportedFilter { .. } => 41,
            Error::Write { .. } => 42,
            Error::Io(_) => 60,
        }
    }
}
