//! Error types for store and persistence operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the brand store and its persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation needs a configuration and none is loaded.
    #[error("no brand configuration loaded")]
    NoConfiguration {
        /// Operation identifier.
        operation: &'static str,
    },
    /// The configuration failed structural validation.
    #[error("brand configuration is invalid: {summary}")]
    Invalid {
        /// Operation identifier.
        operation: &'static str,
        /// Joined validation messages.
        summary: String,
    },
    /// Filesystem operation failed.
    #[error("filesystem operation failed: {operation} ({})", .path.display())]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Serialization of a record or document failed.
    #[error("serialization failed: {operation}")]
    Serialize {
        /// Operation identifier.
        operation: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Export formatting failed.
    #[error("export failed")]
    Export {
        /// Source configuration error.
        #[from]
        source: brandkit_config::ConfigError,
    },
    /// The storage backend is not reachable.
    #[error("storage unavailable: {operation}")]
    Unavailable {
        /// Operation identifier.
        operation: &'static str,
    },
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_operation_and_path() {
        let err = StoreError::Io {
            operation: "read brand record",
            path: PathBuf::from("/tmp/brand.json"),
            source: io::Error::other("denied"),
        };
        assert_eq!(
            err.to_string(),
            "filesystem operation failed: read brand record (/tmp/brand.json)"
        );
    }
}
