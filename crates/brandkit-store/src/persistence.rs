//! Persisted storage record and backends.
//!
//! # Design
//! - One named record `{ state: { brandDNA }, schemaVersion }`; absence and
//!   undecodable content are reported separately so the store can log them,
//!   but both degrade to the default configuration.
//! - File writes go through a temp file and a rename so a crash never leaves a
//!   half-written record behind.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use brandkit_config::{
    BrandConfiguration, ValidationCode, ValidationResult, decode_brand_value,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Current version of the persisted record layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Storage backend holding the single brand record.
#[async_trait]
pub trait BrandPersistence: Send + Sync {
    /// Read the raw record, `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    async fn read(&self) -> StoreResult<Option<String>>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    async fn write(&self, record: &str) -> StoreResult<()>;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;
}

/// Persisted record envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    /// Persisted store state.
    pub state: PersistedState,
    /// Record layout version.
    pub schema_version: u32,
}

/// Persisted subset of the store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// The stored configuration.
    #[serde(rename = "brandDNA")]
    pub brand_dna: BrandConfiguration,
}

impl PersistedRecord {
    /// Wrap `brand_dna` at the current schema version.
    #[must_use]
    pub const fn new(brand_dna: BrandConfiguration) -> Self {
        Self {
            state: PersistedState { brand_dna },
            schema_version: SCHEMA_VERSION,
        }
    }
}

/// Serialize `config` as a persisted record.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if serialization fails.
pub fn encode_record(config: &BrandConfiguration) -> StoreResult<String> {
    serde_json::to_string(&PersistedRecord::new(config.clone())).map_err(|source| {
        StoreError::Serialize {
            operation: "encode brand record",
            source,
        }
    })
}

/// Decode and validate a persisted record.
///
/// # Errors
///
/// Returns the failing [`ValidationResult`] when the record is not JSON, lacks
/// `state.brandDNA`, or holds a configuration that fails validation.
pub fn decode_record(raw: &str) -> Result<BrandConfiguration, ValidationResult> {
    let mut record = serde_json::from_str::<Value>(raw).map_err(|err| {
        ValidationResult::single(
            ValidationCode::InvalidField,
            "$",
            format!("stored record is not valid JSON: {err}"),
        )
    })?;
    if let Some(version) = record.get("schemaVersion").and_then(Value::as_u64)
        && version != u64::from(SCHEMA_VERSION)
    {
        debug!(version, "decoding brand record with foreign schema version");
    }
    let brand = record
        .pointer_mut("/state/brandDNA")
        .map(Value::take)
        .ok_or_else(|| {
            ValidationResult::single(
                ValidationCode::MissingField,
                "state.brandDNA",
                "stored record has no brand configuration",
            )
        })?;
    decode_brand_value(brand)
}

/// Record stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BrandPersistence for FileStorage {
    async fn read(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                operation: "read brand record",
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write(&self, record: &str) -> StoreResult<()> {
        write_atomic(&self.path, record, "write brand record").await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Record held in memory; useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `record`.
    #[must_use]
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(record.into())),
            ..Self::default()
        }
    }

    /// Current raw record.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make every subsequent read and write fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self, operation: &'static str) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable { operation });
        }
        Ok(())
    }
}

#[async_trait]
impl BrandPersistence for MemoryStorage {
    async fn read(&self) -> StoreResult<Option<String>> {
        self.check_available("read brand record")?;
        Ok(self.contents())
    }

    async fn write(&self, record: &str) -> StoreResult<()> {
        self.check_available("write brand record")?;
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Write `contents` to `path` through a sibling temp file.
pub(crate) async fn write_atomic(
    path: &Path,
    contents: &str,
    operation: &'static str,
) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Io {
                operation,
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let temp = temp_path(path);
    fs::write(&temp, contents)
        .await
        .map_err(|source| StoreError::Io {
            operation,
            path: temp.clone(),
            source,
        })?;
    if let Err(source) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(StoreError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_config::default_brand_configuration;

    #[test]
    fn record_uses_persisted_layout() {
        let raw = encode_record(&default_brand_configuration()).expect("encode");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["schemaVersion"], 1);
        assert!(value["state"]["brandDNA"]["colors"].is_object());
    }

    #[test]
    fn decode_round_trips_valid_records() {
        let config = default_brand_configuration();
        let raw = encode_record(&config).expect("encode");
        assert_eq!(decode_record(&raw).expect("decode"), config);
    }

    #[test]
    fn decode_rejects_garbage_and_missing_state() {
        assert!(decode_record("not json").is_err());
        let missing = decode_record(r#"{"schemaVersion": 1}"#).expect_err("no state");
        assert_eq!(missing.errors[0].field, "state.brandDNA");
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("/data/brand.json")),
            PathBuf::from("/data/brand.json.tmp")
        );
    }

    #[tokio::test]
    async fn memory_storage_can_be_made_unavailable() {
        let storage = MemoryStorage::new();
        storage.write("{}").await.expect("write");
        storage.set_unavailable(true);
        assert!(matches!(
            storage.read().await,
            Err(StoreError::Unavailable { .. })
        ));
        storage.set_unavailable(false);
        assert_eq!(storage.read().await.expect("read").as_deref(), Some("{}"));
        assert_eq!(storage.writes(), 1);
    }
}
