//! Preview boundary that every rendered selector is nested under.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::error::{StyleError, StyleResult};

/// Attribute marking a preview container.
pub const PREVIEW_ATTRIBUTE: &str = "data-brand-preview";

/// Identifier of the default preview container.
pub const DEFAULT_PREVIEW_ID: &str = "brand-preview";

/// A named preview container; styles never escape it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PreviewScope {
    id: String,
}

impl PreviewScope {
    /// Create a scope for the container with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidScope`] when `id` is empty or contains
    /// characters other than ASCII letters, digits, `-`, and `_`.
    pub fn new(id: impl Into<String>) -> StyleResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(StyleError::InvalidScope {
                id,
                reason: "must not be empty",
            });
        }
        if !id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(StyleError::InvalidScope {
                id,
                reason: "only letters, digits, '-' and '_' are allowed",
            });
        }
        Ok(Self { id })
    }

    /// Container identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Selector matching the preview container.
    #[must_use]
    pub fn selector(&self) -> String {
        format!("[{PREVIEW_ATTRIBUTE}=\"{}\"]", self.id)
    }

    /// Selector matching the preview container in dark mode.
    #[must_use]
    pub fn dark_selector(&self) -> String {
        format!("{}[data-theme=\"dark\"]", self.selector())
    }
}

impl Default for PreviewScope {
    fn default() -> Self {
        Self {
            id: DEFAULT_PREVIEW_ID.to_string(),
        }
    }
}

impl Display for PreviewScope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.id)
    }
}
