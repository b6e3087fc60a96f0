//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration files.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read a configuration file from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was readable but did not match the expected JSON shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that could not be parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_path() {
        let err = SettingsError::Io {
            path: PathBuf::from("/tmp/skill-rules.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("skill-rules.json"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn json_error_display_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = SettingsError::Json {
            path: PathBuf::from("lifecycle-rules.json"),
            source,
        };
        assert!(err.to_string().starts_with("failed to parse lifecycle-rules.json"));
    }
}
