//! Error types for the record store

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, decoding or persisting records
#[derive(Error, Debug)]
pub enum RecordError {
    /// A `key:value` segment with no `:` or an empty key
    #[error("malformed record segment: {segment:?}")]
    MalformedSegment { segment: String },

    /// Stored value is not a valid integer
    #[error("record {key:?} holds {value:?}, not an integer")]
    ParseInt {
        key: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Stored value is not a valid float
    #[error("record {key:?} holds {value:?}, not a float")]
    ParseFloat {
        key: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// File system failure at `path`
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot envelope or config JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure (e.g. browser storage unavailable)
    #[error("storage error: {0}")]
    Storage(String),
}

impl RecordError {
    /// Create an I/O error tagged with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed segment error
    pub fn malformed(segment: impl Into<String>) -> Self {
        Self::MalformedSegment {
            segment: segment.into(),
        }
    }
}

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, RecordError>;
