//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers every
//! condition that aborts a run. Conditions that are handled locally during
//! the pass (an entry whose timestamp is not a real calendar date) are
//! represented by [`MalformedEntry`] instead and never abort anything.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::ChatStats;
///
/// fn my_function() -> Result<Option<ChatStats>> {
///     // ... operations that may fail
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// The input transcript could not be read.
    ///
    /// This happens when the path does not exist, is a directory, or
    /// permission is denied. No partial statistics are produced.
    #[error("Cannot read chat export '{}': {source}", path.display())]
    SourceUnavailable {
        /// The path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// UTF-8 encoding error.
    ///
    /// Occurs when the transcript is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// No line of the input produced a valid chat entry.
    ///
    /// Without at least one entry there is no start or last date, so this
    /// is reported instead of a statistics record.
    #[error(
        "No chat entries found in {lines} line(s){}. Expected lines like '1/2/23, 10:00 AM - Alice: Hello'",
        malformed_note(.malformed)
    )]
    EmptyInput {
        /// Number of physical lines that were read
        lines: usize,
        /// Number of entries rejected for an invalid date or time
        malformed: usize,
    },

    /// A classification rule pattern failed to compile.
    #[error("Invalid pattern for rule '{name}': {source}")]
    InvalidRule {
        /// Name of the offending rule
        name: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Invalid date in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A report could not be rendered in the requested shape.
    ///
    /// Raised for an unusable date pattern, or for a report format whose
    /// feature is not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Which kind of format was rejected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// An I/O error occurred while writing a report.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    ///
    /// This can occur when loading a config file or writing a JSON report.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatstatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

/// An entry whose timestamp matched the line grammar but does not name a
/// real date or time (e.g. `31/2/23` or `25:10`).
///
/// The line still opens an entry boundary, so its continuation lines are
/// consumed with it, but it is excluded from classification and from the
/// date range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: invalid timestamp '{stamp}'")]
pub struct MalformedEntry {
    /// 1-based line number of the offending timestamp line
    pub line: usize,
    /// The timestamp text as it appeared in the input
    pub stamp: String,
}

fn malformed_note(malformed: &usize) -> String {
    if *malformed > 0 {
        format!(" ({malformed} with invalid dates)")
    } else {
        String::new()
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a source-unavailable error for `path`.
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatstatError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Creates an empty-input error.
    pub fn empty_input(lines: usize, malformed: usize) -> Self {
        ChatstatError::EmptyInput { lines, malformed }
    }

    /// Creates an invalid rule error.
    pub fn invalid_rule(name: impl Into<String>, source: regex::Error) -> Self {
        ChatstatError::InvalidRule {
            name: name.into(),
            source,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if the input could not be read.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, ChatstatError::SourceUnavailable { .. })
    }

    /// Returns `true` if the input held no valid chat entry.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ChatstatError::EmptyInput { .. })
    }

    /// Returns `true` if a rule pattern failed to compile.
    pub fn is_invalid_rule(&self) -> bool {
        matches!(self, ChatstatError::InvalidRule { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatError::InvalidDate { .. })
    }
}
