//! Error types for configuration operations.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Color string was not a valid HSL triple.
    #[error("invalid color '{value}': {reason}")]
    InvalidColor {
        /// Offending color string.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Serialising a configuration document failed.
    #[error("failed to serialize configuration document")]
    Serialize {
        /// Operation identifier.
        operation: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
