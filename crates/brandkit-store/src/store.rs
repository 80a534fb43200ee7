//! The brand store: one configuration slot plus lifecycle and persistence.
//!
//! # Design
//! - Every mutation is a pure `(old, patch) -> new` function; readers keep the
//!   `Arc` snapshot they were handed.
//! - A single generation counter orders operations. Synchronous mutations,
//!   `reset`, `import_brand`, and the start of `load_brand`/`import_file`
//!   advance it; an async completion that observes a different generation is
//!   discarded as superseded.
//! - `save_brand` never advances the generation; it only clears the unsaved
//!   flag when nothing changed while it was writing.
//! - The state lock is never held across an await.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use brandkit_config::{
    AssetsPatch, BrandConfiguration, BrandValue, BrandValuePatch, ColorsPatch, ContrastFinding,
    MetadataPatch, SpacingPatch, StrategyPatch, TypographyPatch, ValidationResult, add_value,
    apply_assets, apply_colors, apply_metadata, apply_spacing, apply_strategy, apply_typography,
    audit_contrast, default_brand_configuration, export_json, parse_imported_json, remove_value,
    stamp_updated, update_value, validate_brand_dna,
};
use brandkit_fonts::StylesheetHost;
use brandkit_theme::{ApplyReport, PreviewContainer, ThemeRenderer};
use chrono::Utc;
use tokio::fs;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::{StoreError, StoreResult};
use crate::persistence::{BrandPersistence, decode_record, encode_record, write_atomic};
use crate::state::{DefaultReason, ImportOutcome, LoadOutcome, SaveOutcome, StoreSnapshot};

#[derive(Debug, Default)]
struct StoreState {
    current: Option<Arc<BrandConfiguration>>,
    error: Option<String>,
    has_unsaved_changes: bool,
    generation: u64,
    loads_in_flight: usize,
}

impl StoreState {
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            current: self.current.clone(),
            is_loading: self.loads_in_flight > 0,
            error: self.error.clone(),
            has_unsaved_changes: self.has_unsaved_changes,
        }
    }

    const fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn adopt(&mut self, config: BrandConfiguration, unsaved: bool) {
        self.current = Some(Arc::new(config));
        self.has_unsaved_changes = unsaved;
    }
}

struct StoreInner {
    persistence: Arc<dyn BrandPersistence>,
    state: Mutex<StoreState>,
    updates: watch::Sender<StoreSnapshot>,
}

/// Handle to the brand store. Clones share state.
#[derive(Clone)]
pub struct BrandStore {
    inner: Arc<StoreInner>,
}

impl BrandStore {
    /// Create an empty store over `persistence` without loading.
    #[must_use]
    pub fn new(persistence: Arc<dyn BrandPersistence>) -> Self {
        let (updates, _) = watch::channel(StoreSnapshot::default());
        Self {
            inner: Arc::new(StoreInner {
                persistence,
                state: Mutex::new(StoreState::default()),
                updates,
            }),
        }
    }

    /// Create a store and load the persisted configuration.
    #[instrument(name = "brand_store.init", skip(persistence), fields(storage = %persistence.describe()))]
    pub async fn init(persistence: Arc<dyn BrandPersistence>) -> Self {
        let store = Self::new(persistence);
        let outcome = store.load_brand().await;
        info!(?outcome, "brand store initialised");
        store
    }

    /// Flush unsaved, valid edits to storage.
    ///
    /// Returns `None` when there was nothing to flush.
    #[instrument(name = "brand_store.shutdown", skip(self))]
    pub async fn shutdown(&self) -> Option<SaveOutcome> {
        let pending = {
            let state = self.lock();
            state.has_unsaved_changes
                && state
                    .current
                    .as_deref()
                    .is_some_and(|config| validate_brand_dna(config).valid)
        };
        if !pending {
            debug!("no unsaved changes to flush");
            return None;
        }
        let outcome = self.save_brand().await;
        info!(?outcome, "flushed unsaved changes on shutdown");
        Some(outcome)
    }

    /// Point-in-time copy of the store state.
    #[must_use]
    pub fn state(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    /// Active configuration, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<BrandConfiguration>> {
        self.lock().current.clone()
    }

    /// Receive a snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Merge a colors patch.
    pub fn update_colors(&self, patch: &ColorsPatch) {
        self.mutate("update_colors", |config| Some(apply_colors(config, patch)));
    }

    /// Merge a typography patch.
    pub fn update_typography(&self, patch: &TypographyPatch) {
        self.mutate("update_typography", |config| {
            Some(apply_typography(config, patch))
        });
    }

    /// Merge a spacing patch.
    pub fn update_spacing(&self, patch: &SpacingPatch) {
        self.mutate("update_spacing", |config| Some(apply_spacing(config, patch)));
    }

    /// Merge an assets patch.
    pub fn update_assets(&self, patch: &AssetsPatch) {
        self.mutate("update_assets", |config| Some(apply_assets(config, patch)));
    }

    /// Merge a metadata patch.
    pub fn update_metadata(&self, patch: &MetadataPatch) {
        self.mutate("update_metadata", |config| Some(apply_metadata(config, patch)));
    }

    /// Merge a strategy patch.
    pub fn update_strategy(&self, patch: &StrategyPatch) {
        self.mutate("update_strategy", |config| Some(apply_strategy(config, patch)));
    }

    /// Append a brand value. Returns `false` when its id is already taken.
    pub fn add_value(&self, value: BrandValue) -> bool {
        self.mutate("add_value", |config| add_value(config, value))
    }

    /// Remove a brand value. Returns `false` when no value has `id`.
    pub fn remove_value(&self, id: &str) -> bool {
        self.mutate("remove_value", |config| remove_value(config, id))
    }

    /// Patch a brand value. Returns `false` when no value has `id`.
    pub fn update_value(&self, id: &str, patch: &BrandValuePatch) -> bool {
        self.mutate("update_value", |config| update_value(config, id, patch))
    }

    /// Replace the configuration with a fresh default.
    pub fn reset(&self) {
        let now = Utc::now();
        let mut config = default_brand_configuration();
        config.metadata.created_at = now;
        config.metadata.updated_at = now;
        let generation = {
            let mut state = self.lock();
            state.adopt(config, true);
            state.error = None;
            state.advance()
        };
        info!(generation, "brand configuration reset to default");
        self.publish();
    }

    /// Load the persisted configuration.
    ///
    /// Missing or invalid records degrade to the default configuration. A read
    /// failure leaves `current` untouched and records the error.
    #[instrument(name = "brand_store.load", skip(self))]
    pub async fn load_brand(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.lock();
            state.loads_in_flight += 1;
            state.advance()
        };
        self.publish();

        let read = self.inner.persistence.read().await;

        let outcome = {
            let mut state = self.lock();
            state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
            if state.generation == generation {
                Self::settle_load(&mut state, read)
            } else {
                info!(
                    generation,
                    latest = state.generation,
                    "discarding superseded load"
                );
                LoadOutcome::Superseded
            }
        };
        self.publish();
        outcome
    }

    fn settle_load(state: &mut StoreState, read: StoreResult<Option<String>>) -> LoadOutcome {
        match read {
            Err(err) => {
                warn!(error = %err, "failed to read brand record");
                let error = err.to_string();
                state.error = Some(error.clone());
                LoadOutcome::Failed { error }
            }
            Ok(None) => {
                info!("no stored brand configuration; using default");
                state.adopt(default_brand_configuration(), false);
                state.error = None;
                LoadOutcome::Defaulted(DefaultReason::Missing)
            }
            Ok(Some(raw)) => match decode_record(&raw) {
                Ok(config) => {
                    info!(name = %config.metadata.name, "brand configuration loaded");
                    state.adopt(config, false);
                    state.error = None;
                    LoadOutcome::Loaded
                }
                Err(result) => {
                    warn!(
                        issues = result.errors.len(),
                        summary = %result.summary(),
                        "stored brand configuration is invalid; using default"
                    );
                    state.adopt(default_brand_configuration(), false);
                    state.error = None;
                    LoadOutcome::Defaulted(DefaultReason::Corrupt(result))
                }
            },
        }
    }

    /// Validate and persist the current configuration.
    #[instrument(name = "brand_store.save", skip(self))]
    pub async fn save_brand(&self) -> SaveOutcome {
        let (config, generation) = {
            let mut state = self.lock();
            let Some(config) = state.current.clone() else {
                state.error = Some(StoreError::NoConfiguration { operation: "save" }.to_string());
                drop(state);
                self.publish();
                return SaveOutcome::NoConfiguration;
            };
            let result = validate_brand_dna(&config);
            if !result.valid {
                warn!(issues = result.errors.len(), "save rejected by validation");
                state.error = Some(result.summary());
                drop(state);
                self.publish();
                return SaveOutcome::Rejected(result);
            }
            (config, state.generation)
        };

        let written = match encode_record(&config) {
            Ok(record) => self.inner.persistence.write(&record).await,
            Err(err) => Err(err),
        };

        let outcome = {
            let mut state = self.lock();
            match written {
                Ok(()) => {
                    state.error = None;
                    if state.generation == generation {
                        state.has_unsaved_changes = false;
                    } else {
                        debug!("configuration changed while saving; keeping unsaved flag");
                    }
                    info!(storage = %self.inner.persistence.describe(), "brand configuration saved");
                    SaveOutcome::Saved
                }
                Err(err) => {
                    warn!(error = %err, "failed to persist brand configuration");
                    let error = err.to_string();
                    state.error = Some(error.clone());
                    SaveOutcome::Failed { error }
                }
            }
        };
        self.publish();
        outcome
    }

    /// Replace the configuration with an imported document.
    ///
    /// Rejected documents leave the store untouched apart from `error`.
    pub fn import_brand(&self, json: &str) -> ValidationResult {
        match parse_imported_json(json) {
            Ok(config) => {
                let config = stamp_updated(config, Utc::now());
                let generation = {
                    let mut state = self.lock();
                    state.adopt(config, true);
                    state.error = None;
                    state.advance()
                };
                info!(generation, "brand configuration imported");
                self.publish();
                ValidationResult::ok()
            }
            Err(result) => {
                warn!(issues = result.errors.len(), "import rejected");
                self.lock().error = Some(result.summary());
                self.publish();
                result
            }
        }
    }

    /// Read `path` and import it.
    #[instrument(name = "brand_store.import_file", skip(self), fields(path = %path.display()))]
    pub async fn import_file(&self, path: &Path) -> ImportOutcome {
        let generation = self.lock().advance();
        let read = fs::read_to_string(path).await;

        if self.lock().generation != generation {
            info!("discarding superseded import");
            return ImportOutcome::Superseded;
        }
        match read {
            Ok(json) => {
                let result = self.import_brand(&json);
                if result.valid {
                    ImportOutcome::Imported
                } else {
                    ImportOutcome::Rejected(result)
                }
            }
            Err(source) => {
                let err = StoreError::Io {
                    operation: "read import file",
                    path: path.to_path_buf(),
                    source,
                };
                warn!(error = %err, "import file unreadable");
                let error = err.to_string();
                self.lock().error = Some(error.clone());
                self.publish();
                ImportOutcome::Failed { error }
            }
        }
    }

    /// Export the current configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoConfiguration`] without a configuration,
    /// [`StoreError::Invalid`] when it fails validation, and
    /// [`StoreError::Export`] when formatting fails.
    pub fn export_brand(&self) -> StoreResult<String> {
        let config = self
            .current()
            .ok_or(StoreError::NoConfiguration { operation: "export" })?;
        let result = validate_brand_dna(&config);
        if !result.valid {
            return Err(StoreError::Invalid {
                operation: "export",
                summary: result.summary(),
            });
        }
        Ok(export_json(&config, Utc::now())?)
    }

    /// Export the current configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::export_brand`] errors and [`StoreError::Io`] when
    /// the file cannot be written.
    #[instrument(name = "brand_store.export_file", skip(self), fields(path = %path.display()))]
    pub async fn export_to_file(&self, path: &Path) -> StoreResult<PathBuf> {
        let json = self.export_brand()?;
        write_atomic(path, &json, "write export file").await?;
        info!("brand configuration exported");
        Ok(path.to_path_buf())
    }

    /// Apply the current configuration to `container`.
    ///
    /// Returns `None` when nothing was applied. Failures are recorded in the
    /// store's `error`.
    pub async fn apply_theme<H: StylesheetHost + 'static>(
        &self,
        renderer: &ThemeRenderer<H>,
        container: &dyn PreviewContainer,
    ) -> Option<ApplyReport> {
        let Some(config) = self.current() else {
            warn!("apply_theme called without a brand configuration");
            return None;
        };
        let applied = renderer.apply(&config, container).await;
        let (report, error) = match applied {
            Ok(report) => {
                let error = report.failure_summary();
                (Some(report), error)
            }
            Err(err) => {
                warn!(error = %err, "theme not applied");
                (None, Some(err.to_string()))
            }
        };
        if let Some(error) = error {
            self.lock().error = Some(error);
            self.publish();
        }
        report
    }

    /// Advisory contrast findings for the current configuration.
    #[must_use]
    pub fn audit_contrast(&self) -> Vec<ContrastFinding> {
        self.current()
            .map(|config| audit_contrast(&config))
            .unwrap_or_default()
    }

    /// Structural validation of the current configuration.
    #[must_use]
    pub fn validate(&self) -> Option<ValidationResult> {
        self.current().map(|config| validate_brand_dna(&config))
    }

    fn mutate(
        &self,
        operation: &'static str,
        change: impl FnOnce(&BrandConfiguration) -> Option<BrandConfiguration>,
    ) -> bool {
        let generation = {
            let mut state = self.lock();
            let base = state
                .current
                .clone()
                .unwrap_or_else(|| Arc::new(default_brand_configuration()));
            let Some(next) = change(&base) else {
                debug!(operation, "mutation left configuration unchanged");
                return false;
            };
            state.adopt(stamp_updated(next, Utc::now()), true);
            state.advance()
        };
        debug!(operation, generation, "brand configuration updated");
        self.publish();
        true
    }

    fn publish(&self) {
        let snapshot = self.state();
        self.inner.updates.send_replace(snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
