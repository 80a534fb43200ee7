use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use brandkit_config::{
    BrandValue, ColorRole, ColorValue, ColorsPatch, EXPORT_VERSION, MetadataPatch, RadiusToken,
    SpacingPatch, ThemeVariant, TokenSet, ValidationCode, default_brand_configuration,
};
use brandkit_fonts::FontLoader;
use brandkit_store::{
    BrandPersistence, BrandStore, DefaultReason, ImportOutcome, LoadOutcome, MemoryStorage,
    SaveOutcome, StoreError, StoreResult, encode_record,
};
use brandkit_test_support::fixtures::{corrupt_persisted_record, sample_brand, sample_export_json};
use brandkit_test_support::mocks::RecordingHost;
use brandkit_theme::{PreviewScope, ScopedStyleSheet, StyleLayer, ThemeRenderer};
use serde_json::Value;
use tokio::sync::Semaphore;

/// Storage whose reads and writes block until the test releases them.
struct GatedStorage {
    inner: MemoryStorage,
    reads: Semaphore,
    writes: Semaphore,
}

impl GatedStorage {
    fn with_record(record: String) -> Self {
        Self {
            inner: MemoryStorage::with_record(record),
            reads: Semaphore::new(0),
            writes: Semaphore::new(0),
        }
    }
}

#[async_trait]
impl BrandPersistence for GatedStorage {
    async fn read(&self) -> StoreResult<Option<String>> {
        self.reads
            .acquire()
            .await
            .map_err(|_| StoreError::Unavailable { operation: "read" })?
            .forget();
        self.inner.read().await
    }

    async fn write(&self, record: &str) -> StoreResult<()> {
        self.writes
            .acquire()
            .await
            .map_err(|_| StoreError::Unavailable { operation: "write" })?
            .forget();
        self.inner.write(record).await
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached");
}

fn stored(config: &brandkit_config::BrandConfiguration) -> String {
    encode_record(config).expect("encode record")
}

#[tokio::test]
async fn init_adopts_stored_configuration() -> anyhow::Result<()> {
    let storage = Arc::new(MemoryStorage::with_record(stored(&sample_brand())));
    let store = BrandStore::init(storage).await;

    let state = store.state();
    assert_eq!(state.current.as_deref(), Some(&sample_brand()));
    assert!(!state.has_unsaved_changes);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    Ok(())
}

#[tokio::test]
async fn empty_storage_loads_default() {
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    let outcome = store.load_brand().await;
    assert_eq!(outcome, LoadOutcome::Defaulted(DefaultReason::Missing));
    assert_eq!(store.current().as_deref(), Some(&default_brand_configuration()));
    assert!(!store.state().has_unsaved_changes);
}

#[tokio::test]
async fn corrupt_storage_falls_back_to_default_without_error() {
    let store = BrandStore::new(Arc::new(MemoryStorage::with_record(
        corrupt_persisted_record(),
    )));
    let outcome = store.load_brand().await;

    let LoadOutcome::Defaulted(DefaultReason::Corrupt(result)) = outcome else {
        panic!("expected corrupt fallback, got {outcome:?}");
    };
    assert!(result.has_code(ValidationCode::PaletteSizeMismatch));
    let state = store.state();
    assert_eq!(state.current.as_deref(), Some(&default_brand_configuration()));
    assert!(state.error.is_none());
    assert!(!state.has_unsaved_changes);
}

#[tokio::test]
async fn unreadable_storage_keeps_current_and_records_error() {
    let storage = Arc::new(MemoryStorage::new());
    let store = BrandStore::new(storage.clone());
    store.reset();
    let before = store.current();

    storage.set_unavailable(true);
    let outcome = store.load_brand().await;
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(store.current(), before);
    assert!(store.state().error.is_some());
}

#[tokio::test]
async fn reset_during_load_discards_the_stale_result() -> anyhow::Result<()> {
    let storage = Arc::new(GatedStorage::with_record(stored(&sample_brand())));
    let store = BrandStore::new(storage.clone());

    let loading = tokio::spawn({
        let store = store.clone();
        async move { store.load_brand().await }
    });
    wait_until(|| store.state().is_loading).await;

    store.reset();
    let reset_result = store.current();
    storage.reads.add_permits(1);

    assert_eq!(loading.await?, LoadOutcome::Superseded);
    let state = store.state();
    assert_eq!(state.current, reset_result);
    assert_eq!(
        state.current.as_ref().map(|config| config.metadata.name.as_str()),
        Some("Untitled Brand")
    );
    assert!(state.has_unsaved_changes);
    assert!(!state.is_loading);
    Ok(())
}

#[tokio::test]
async fn import_during_load_wins() -> anyhow::Result<()> {
    let storage = Arc::new(GatedStorage::with_record(stored(&default_brand_configuration())));
    let store = BrandStore::new(storage.clone());

    let loading = tokio::spawn({
        let store = store.clone();
        async move { store.load_brand().await }
    });
    wait_until(|| store.state().is_loading).await;

    assert!(store.import_brand(&sample_export_json()).valid);
    storage.reads.add_permits(1);

    assert_eq!(loading.await?, LoadOutcome::Superseded);
    let current = store.current().expect("imported configuration");
    assert_eq!(current.metadata.name, "Northwind");
    Ok(())
}

#[tokio::test]
async fn newer_load_supersedes_older_load() -> anyhow::Result<()> {
    let storage = Arc::new(GatedStorage::with_record(stored(&sample_brand())));
    let store = BrandStore::new(storage.clone());

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.load_brand().await }
    });
    wait_until(|| store.state().is_loading).await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.load_brand().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    storage.reads.add_permits(2);

    let outcomes = [first.await?, second.await?];
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| **outcome == LoadOutcome::Loaded)
            .count(),
        1
    );
    assert!(outcomes.contains(&LoadOutcome::Superseded));
    assert_eq!(store.current().as_deref(), Some(&sample_brand()));
    Ok(())
}

#[tokio::test]
async fn bad_import_leaves_state_untouched() {
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    store.load_brand().await;
    let before = store.state();

    let result = store.import_brand("{not json");
    assert!(!result.valid);
    assert_eq!(result.errors[0].code, ValidationCode::ImportParseError);

    let after = store.state();
    assert_eq!(after.current, before.current);
    assert_eq!(after.has_unsaved_changes, before.has_unsaved_changes);
    assert!(after.error.is_some());
}

#[tokio::test]
async fn export_then_import_round_trips() -> anyhow::Result<()> {
    let source = BrandStore::new(Arc::new(MemoryStorage::with_record(stored(&sample_brand()))));
    source.load_brand().await;
    let exported = source.export_brand()?;
    let document: Value = serde_json::from_str(&exported)?;
    assert_eq!(document["exportVersion"], EXPORT_VERSION);
    assert!(document["exportedAt"].is_string());

    let target = BrandStore::new(Arc::new(MemoryStorage::new()));
    assert!(target.import_brand(&exported).valid);
    let mut imported = (*target.current().expect("imported")).clone();
    assert!(imported.metadata.updated_at >= sample_brand().metadata.updated_at);
    imported.metadata.updated_at = sample_brand().metadata.updated_at;
    assert_eq!(imported, sample_brand());
    assert!(target.state().has_unsaved_changes);
    Ok(())
}

#[tokio::test]
async fn export_requires_a_configuration() {
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    assert!(matches!(
        store.export_brand(),
        Err(StoreError::NoConfiguration { .. })
    ));
}

#[tokio::test]
async fn update_colors_changes_only_the_named_role() {
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    store.load_brand().await;
    let before = store.current().expect("configuration");

    store.update_colors(&ColorsPatch {
        light: Some(BTreeMap::from([(
            ColorRole::Primary,
            ColorValue::from("340 82% 52%"),
        )])),
        ..ColorsPatch::default()
    });
    let after = store.current().expect("configuration");

    for variant in ThemeVariant::ALL {
        for role in ColorRole::ALL {
            let old = before.colors.theme(*variant).get(role);
            let new = after.colors.theme(*variant).get(role);
            if *variant == ThemeVariant::Light && *role == ColorRole::Primary {
                assert_eq!(new.map(ColorValue::as_str), Some("340 82% 52%"));
            } else {
                assert_eq!(old, new);
            }
        }
    }
    assert!(after.metadata.updated_at >= before.metadata.updated_at);
    assert!(store.state().has_unsaved_changes);
}

#[tokio::test]
async fn save_rejects_invalid_configuration() {
    let storage = Arc::new(MemoryStorage::new());
    let store = BrandStore::new(storage.clone());
    store.reset();
    store.update_colors(&ColorsPatch {
        chart: Some(vec![ColorValue::from("0 0% 0%"); 6]),
        ..ColorsPatch::default()
    });

    let outcome = store.save_brand().await;
    let SaveOutcome::Rejected(result) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert!(result.has_code(ValidationCode::PaletteSizeMismatch));
    assert_eq!(storage.writes(), 0);
    let state = store.state();
    assert!(state.has_unsaved_changes);
    assert!(
        state
            .error
            .as_deref()
            .is_some_and(|error| error.contains("colors.chart"))
    );
}

#[tokio::test]
async fn save_persists_and_clears_unsaved() -> anyhow::Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let store = BrandStore::new(storage.clone());
    store.load_brand().await;
    store.update_spacing(&SpacingPatch {
        radius: Some(BTreeMap::from([(RadiusToken::Lg, "0.75rem".to_string())])),
        spacing: None,
    });

    assert_eq!(store.save_brand().await, SaveOutcome::Saved);
    assert!(!store.state().has_unsaved_changes);

    let reloaded = BrandStore::init(storage).await;
    assert_eq!(reloaded.current(), store.current());
    Ok(())
}

#[tokio::test]
async fn storage_failure_on_save_keeps_edits() {
    let storage = Arc::new(MemoryStorage::new());
    let store = BrandStore::new(storage.clone());
    store.reset();
    storage.set_unavailable(true);

    let outcome = store.save_brand().await;
    assert!(matches!(outcome, SaveOutcome::Failed { .. }));
    let state = store.state();
    assert!(state.has_unsaved_changes);
    assert!(state.current.is_some());
    assert!(state.error.is_some());
}

#[tokio::test]
async fn edit_during_save_stays_unsaved() -> anyhow::Result<()> {
    let storage = Arc::new(GatedStorage::with_record(stored(&default_brand_configuration())));
    let store = BrandStore::new(storage.clone());
    storage.reads.add_permits(1);
    store.load_brand().await;
    store.update_metadata(&MetadataPatch {
        name: Some("Before save".into()),
        tagline: None,
    });

    let saving = tokio::spawn({
        let store = store.clone();
        async move { store.save_brand().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    store.update_metadata(&MetadataPatch {
        name: Some("During save".into()),
        tagline: None,
    });
    storage.writes.add_permits(1);

    assert_eq!(saving.await?, SaveOutcome::Saved);
    assert!(store.state().has_unsaved_changes);
    Ok(())
}

#[tokio::test]
async fn value_operations_are_keyed_by_id() {
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    store.reset();
    let value = BrandValue::new("Craft", "Details matter.");
    let id = value.id.clone();

    assert!(store.add_value(value.clone()));
    assert!(!store.add_value(value));
    assert!(!store.remove_value("not-there"));
    assert!(store.remove_value(&id));
    let strategy = store
        .current()
        .and_then(|config| config.strategy.clone())
        .expect("strategy");
    assert!(strategy.values.is_empty());
}

#[tokio::test]
async fn file_storage_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("brand.json");
    let storage = Arc::new(brandkit_store::FileStorage::new(&path));

    let store = BrandStore::init(storage.clone()).await;
    store.update_metadata(&MetadataPatch {
        name: Some("Filed".into()),
        tagline: None,
    });
    assert_eq!(store.save_brand().await, SaveOutcome::Saved);
    assert!(path.exists());
    assert!(!path.with_file_name("brand.json.tmp").exists());

    let reopened = BrandStore::init(storage).await;
    assert_eq!(
        reopened.current().map(|config| config.metadata.name.clone()),
        Some("Filed".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn import_and_export_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let import_path = dir.path().join("incoming.json");
    std::fs::write(&import_path, sample_export_json())?;

    let store = BrandStore::new(Arc::new(MemoryStorage::new()));
    assert_eq!(store.import_file(&import_path).await, ImportOutcome::Imported);

    let export_path = dir.path().join("out").join("brand-export.json");
    store.export_to_file(&export_path).await?;
    let exported: Value = serde_json::from_str(&std::fs::read_to_string(&export_path)?)?;
    assert_eq!(exported["metadata"]["name"], "Northwind");

    let missing = store.import_file(&dir.path().join("missing.json")).await;
    assert!(matches!(missing, ImportOutcome::Failed { .. }));
    assert_eq!(
        store.current().map(|config| config.metadata.name.clone()),
        Some("Northwind".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn apply_theme_records_font_failures() -> anyhow::Result<()> {
    let host = Arc::new(RecordingHost::new());
    host.fail_matching("Inter");
    let renderer = ThemeRenderer::new(Arc::new(FontLoader::new(host.clone())));
    let sheet = ScopedStyleSheet::new(PreviewScope::new("editor")?);
    let store = BrandStore::new(Arc::new(MemoryStorage::new()));

    assert!(store.apply_theme(&renderer, &sheet).await.is_none());
    assert!(sheet.is_empty());

    store.load_brand().await;
    let report = store
        .apply_theme(&renderer, &sheet)
        .await
        .expect("theme applied");
    assert_eq!(report.font_errors.len(), 1);
    assert_eq!(
        sheet.get(StyleLayer::Base, "--brand-primary").as_deref(),
        Some("221.2 83.2% 53.3%")
    );
    assert!(store.state().error.is_some());
    Ok(())
}

#[tokio::test]
async fn shutdown_flushes_valid_unsaved_edits() {
    let storage = Arc::new(MemoryStorage::new());
    let store = BrandStore::new(storage.clone());
    assert!(store.shutdown().await.is_none());

    store.reset();
    assert_eq!(store.shutdown().await, Some(SaveOutcome::Saved));
    assert_eq!(storage.writes(), 1);
    assert!(store.shutdown().await.is_none());
}
