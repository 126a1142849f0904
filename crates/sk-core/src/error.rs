//! Error types for the outer surfaces of the core: file reading, config
//! deserialization and event-line parsing.

use std::path::PathBuf;

/// Alias for `Result<T, SkError>`.
pub type SkResult<T> = Result<T, SkError>;

/// Errors raised while loading race inputs.
#[derive(Debug, thiserror::Error)]
pub enum SkError {
    /// A file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The race config is not valid JSON for [`crate::RaceConfig`].
    #[error("invalid race config: {0}")]
    Config(#[from] serde_json::Error),

    /// An event-log line was rejected.
    #[error("line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number in the source text.
        line: usize,
        /// Why the line was rejected.
        reason: LineError,
    },
}

/// Why a single event-log line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// The line does not start with `[`.
    #[error("time must start with '['")]
    MissingOpenBracket,

    /// The closing `]` after the time is missing.
    #[error("missing closing ']' after time")]
    MissingCloseBracket,

    /// The bracketed time is not `HH:MM:SS.mmm`.
    #[error("invalid time \"{0}\"")]
    InvalidTime(String),

    /// Event id or competitor id is missing.
    #[error("expected event id and competitor id")]
    MissingFields,

    /// The event id is not an unsigned integer.
    #[error("invalid event id \"{0}\"")]
    InvalidEventId(String),

    /// The competitor id is not an unsigned integer.
    #[error("invalid competitor id \"{0}\"")]
    InvalidCompetitorId(String),
}
