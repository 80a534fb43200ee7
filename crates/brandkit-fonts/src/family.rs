//! Font family descriptor stored inside a brand configuration.

use serde::{Deserialize, Serialize};

/// Font style axis supported by a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright glyphs.
    Normal,
    /// Italic glyphs.
    Italic,
}

impl FontStyle {
    /// CSS keyword for the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }
}

/// A font family selection for one typography role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    /// Family name as published by the provider.
    pub name: String,
    /// Selected weights in ascending order.
    pub weights: Vec<u16>,
    /// Selected styles.
    #[serde(default)]
    pub styles: Vec<FontStyle>,
    /// Generic or system families used while the web font is unavailable.
    #[serde(default)]
    pub fallback: Vec<String>,
    /// Stylesheet source for the family, if hosted externally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FontFamily {
    /// Render a CSS `font-family` stack, quoting names that need it.
    #[must_use]
    pub fn css_stack(&self) -> String {
        let mut parts = Vec::with_capacity(self.fallback.len() + 1);
        parts.push(format!("\"{}\"", self.name));
        for fallback in &self.fallback {
            if fallback.chars().any(char::is_whitespace) {
                parts.push(format!("\"{fallback}\""));
            } else {
                parts.push(fallback.clone());
            }
        }
        parts.join(", ")
    }

    /// Whether the family carries an italic style.
    #[must_use]
    pub fn has_italic(&self) -> bool {
        self.styles.contains(&FontStyle::Italic)
    }
}
