//! Error types for the skills engine.
//!
//! Only persistence can fail in a way callers see. Configuration, pattern and
//! dependency problems are degraded to defaults or skipped edges and logged.

use std::path::PathBuf;

/// Errors that can occur while loading or saving conversation state.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// I/O error while reading or writing the state file.
    #[error("state I/O error at {path}: {source}")]
    Io {
        /// State file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// State file contents did not match the expected shape.
    #[error("invalid state file {path}: {source}")]
    InvalidState {
        /// State file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// State could not be serialized.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for skills engine operations.
pub type Result<T> = std::result::Result<T, SkillError>;
