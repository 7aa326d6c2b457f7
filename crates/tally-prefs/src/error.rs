//! # Store Error Types
//!
//! Failures inside the preference stores.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PrefsError (this module) ← Adds path and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PreferenceStore impl     ← Logs at warn, returns false / None         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Preference store errors.
///
/// Never leaves this crate through the `PreferenceStore` trait; the
/// store methods that return it are for callers that want the detail.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Reading or writing the preferences file failed.
    ///
    /// ## When This Occurs
    /// - Directory not writable
    /// - Disk full
    /// - Path is a directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored text is not JSON.
    #[error("Malformed preferences: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The stored JSON is valid but not an object.
    #[error("Preferences must be a JSON object, found {0}")]
    NotAnObject(String),

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory for preferences")]
    NoDataDir,

    /// Write refused (in-memory store failure injection).
    #[error("Store rejected the write: {0}")]
    Rejected(String),
}

impl PrefsError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrefsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type PrefsResult<T> = Result<T, PrefsError>;
