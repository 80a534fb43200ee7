//! Write targets for rendered style variables.
//!
//! # Design
//! - `PreviewContainer` is the only sink the renderer writes to; there is no
//!   document-wide target.
//! - Values that could close the scoped rule (`;`, `{`, `}`) are refused.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

use crate::contract::{VARIABLE_PREFIX, breaks_declaration};
use crate::error::{StyleError, StyleResult};
use crate::scope::PreviewScope;

/// Rule a variable is written to inside the preview scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleLayer {
    /// The scope selector itself.
    Base,
    /// The scope selector in dark mode.
    Dark,
}

/// A preview container able to hold scoped custom properties.
pub trait PreviewContainer: Send + Sync {
    /// Scope the container represents.
    fn scope(&self) -> &PreviewScope;

    /// Set custom property `name` to `value` in `layer`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Property`] when the container refuses the write.
    fn set_property(&self, layer: StyleLayer, name: &str, value: &str) -> StyleResult<()>;
}

/// In-memory container that renders its properties as a scoped stylesheet.
#[derive(Debug)]
pub struct ScopedStyleSheet {
    scope: PreviewScope,
    properties: Mutex<BTreeMap<(StyleLayer, String), String>>,
}

impl ScopedStyleSheet {
    /// Create an empty sheet for `scope`.
    #[must_use]
    pub fn new(scope: PreviewScope) -> Self {
        Self {
            scope,
            properties: Mutex::new(BTreeMap::new()),
        }
    }

    /// Current value of `name` in `layer`.
    #[must_use]
    pub fn get(&self, layer: StyleLayer, name: &str) -> Option<String> {
        self.properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(layer, name.to_string()))
            .cloned()
    }

    /// Number of properties written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the held properties, sorted by name within each layer.
    #[must_use]
    pub fn to_css(&self) -> String {
        let properties = self
            .properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut css = String::new();
        for (layer, selector) in [
            (StyleLayer::Base, self.scope.selector()),
            (StyleLayer::Dark, self.scope.dark_selector()),
        ] {
            let mut entries = properties
                .iter()
                .filter(|((candidate, _), _)| *candidate == layer)
                .peekable();
            if entries.peek().is_none() {
                continue;
            }
            if !css.is_empty() {
                css.push('\n');
            }
            let _ = writeln!(css, "{selector} {{");
            for ((_, name), value) in entries {
                let _ = writeln!(css, "  {name}: {value};");
            }
            css.push_str("}\n");
        }
        css
    }
}

impl PreviewContainer for ScopedStyleSheet {
    fn scope(&self) -> &PreviewScope {
        &self.scope
    }

    fn set_property(&self, layer: StyleLayer, name: &str, value: &str) -> StyleResult<()> {
        if !name.starts_with(VARIABLE_PREFIX) {
            return Err(StyleError::Property {
                name: name.to_string(),
                reason: format!("property names must start with '{VARIABLE_PREFIX}'"),
            });
        }
        if breaks_declaration(value) {
            return Err(StyleError::Property {
                name: name.to_string(),
                reason: "value would escape the preview rule".to_string(),
            });
        }
        self.properties
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((layer, name.to_string()), value.to_string());
        Ok(())
    }
}
