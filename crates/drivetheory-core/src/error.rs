//! Error types shared across drivetheory crates.
//!
//! Quiz sources and key-value stores report failures through these enums so
//! callers can tell a missing topic from a broken network without string
//! matching.

use thiserror::Error;

/// Errors from loading quiz, catalog or resource data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No data exists for the requested topic or resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading local data failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The data was found but is not valid JSON for the expected shape.
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with an error status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl SourceError {
    /// Returns `true` if the data simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Errors from a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value for a key is not valid JSON.
    #[error("stored value for key '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
