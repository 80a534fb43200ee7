//! Error types for font catalog and loading operations.

use std::time::Duration;

use thiserror::Error;

/// Primary error type for font operations.
#[derive(Debug, Error)]
pub enum FontError {
    /// Requested family is not part of the catalog.
    #[error("unknown font family '{name}'")]
    UnknownFamily {
        /// Family name supplied by the caller.
        name: String,
    },
    /// Category label did not match a known category.
    #[error("unknown font category '{value}'")]
    UnknownCategory {
        /// Category payload supplied by the caller.
        value: String,
    },
    /// Host reported that the stylesheet failed to load.
    #[error("font stylesheet failed to load")]
    LoadFailed {
        /// Stylesheet URL that failed.
        href: String,
        /// Host-provided failure detail.
        reason: String,
    },
    /// Host did not report completion within the configured bound.
    #[error("font stylesheet load timed out")]
    Timeout {
        /// Stylesheet URL that stalled.
        href: String,
        /// Bound that elapsed.
        after: Duration,
    },
}

/// Convenience alias for font results.
pub type FontResult<T> = Result<T, FontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let cases = vec![
            (
                FontError::UnknownFamily {
                    name: "Comic".into(),
                },
                "unknown font family 'Comic'",
            ),
            (
                FontError::UnknownCategory {
                    value: "gothic".into(),
                },
                "unknown font category 'gothic'",
            ),
            (
                FontError::LoadFailed {
                    href: "https://fonts.example/a.css".into(),
                    reason: "404".into(),
                },
                "font stylesheet failed to load",
            ),
            (
                FontError::Timeout {
                    href: "https://fonts.example/a.css".into(),
                    after: Duration::from_secs(1),
                },
                "font stylesheet load timed out",
            ),
        ];
        for (err, message) in cases {
            assert_eq!(err.to_string(), message);
        }
    }
}
