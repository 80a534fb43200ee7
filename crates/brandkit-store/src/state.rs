//! Store snapshots and operation outcomes.

use std::sync::Arc;

use brandkit_config::{BrandConfiguration, ValidationResult};

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    /// Active configuration, if any.
    pub current: Option<Arc<BrandConfiguration>>,
    /// Whether a load is in flight.
    pub is_loading: bool,
    /// Last operation failure, for display.
    pub error: Option<String>,
    /// Whether `current` differs from what was last loaded or saved.
    pub has_unsaved_changes: bool,
}

/// Why the default configuration was adopted on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// Nothing was stored yet.
    Missing,
    /// The stored record could not be decoded or failed validation.
    Corrupt(ValidationResult),
}

/// Result of [`crate::BrandStore::load_brand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored configuration was adopted.
    Loaded,
    /// The default configuration was adopted.
    Defaulted(DefaultReason),
    /// A newer operation started first; nothing was changed.
    Superseded,
    /// Storage could not be read; `current` was left untouched.
    Failed {
        /// Failure message, also recorded in the store's `error`.
        error: String,
    },
}

/// Result of [`crate::BrandStore::save_brand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The configuration was persisted.
    Saved,
    /// Structural validation failed; nothing was written.
    Rejected(ValidationResult),
    /// There is no configuration to save.
    NoConfiguration,
    /// Storage could not be written.
    Failed {
        /// Failure message, also recorded in the store's `error`.
        error: String,
    },
}

impl SaveOutcome {
    /// Whether the configuration reached storage.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Result of [`crate::BrandStore::import_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The document replaced the current configuration.
    Imported,
    /// The document failed import validation; nothing was changed.
    Rejected(ValidationResult),
    /// A newer operation started while the file was being read.
    Superseded,
    /// The file could not be read.
    Failed {
        /// Failure message, also recorded in the store's `error`.
        error: String,
    },
}
