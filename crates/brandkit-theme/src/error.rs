//! Error types for style rendering.

use thiserror::Error;

/// Errors raised while rendering or applying a style contract.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The preview identifier cannot be used in a selector.
    #[error("invalid preview id '{id}': {reason}")]
    InvalidScope {
        /// Offending identifier.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The configuration failed structural validation and was not applied.
    #[error("configuration is not renderable: {summary}")]
    InvalidConfiguration {
        /// Joined validation messages.
        summary: String,
    },
    /// A container refused a property write.
    #[error("failed to set style property '{name}': {reason}")]
    Property {
        /// Variable name.
        name: String,
        /// Reason reported by the container.
        reason: String,
    },
}

/// Convenience alias for style results.
pub type StyleResult<T> = Result<T, StyleError>;
