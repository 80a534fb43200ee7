//! Shared store context and CLI error types.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use brandkit_config::BrandConfiguration;
use brandkit_store::{
    BrandStore, DefaultReason, FileStorage, LoadOutcome, SaveOutcome, StoreError,
};
use tracing::{debug, warn};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Invalid { summary, .. } => Self::Validation(summary),
            other => Self::Failure(other.into()),
        }
    }
}

/// Store opened over the configured storage file.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) store: BrandStore,
    pub(crate) storage_path: PathBuf,
}

impl AppContext {
    /// Open the storage file and load whatever it holds.
    pub(crate) async fn open(storage_path: &Path) -> CliResult<Self> {
        let store = BrandStore::new(Arc::new(FileStorage::new(storage_path)));
        match store.load_brand().await {
            LoadOutcome::Loaded | LoadOutcome::Defaulted(DefaultReason::Missing) => {}
            LoadOutcome::Defaulted(DefaultReason::Corrupt(result)) => {
                warn!(
                    path = %storage_path.display(),
                    issues = %result.summary(),
                    "stored brand configuration unusable; using defaults"
                );
            }
            LoadOutcome::Superseded => debug!("initial load superseded"),
            LoadOutcome::Failed { error } => {
                return Err(CliError::failure(anyhow!(
                    "failed to load brand configuration from {}: {error}",
                    storage_path.display()
                )));
            }
        }
        Ok(Self {
            store,
            storage_path: storage_path.to_path_buf(),
        })
    }

    /// The active configuration.
    pub(crate) fn current(&self) -> CliResult<Arc<BrandConfiguration>> {
        self.store
            .current()
            .ok_or_else(|| CliError::failure(anyhow!("no brand configuration loaded")))
    }

    /// Write the active configuration back to the storage file.
    pub(crate) async fn persist(&self) -> CliResult<()> {
        match self.store.save_brand().await {
            SaveOutcome::Saved => Ok(()),
            SaveOutcome::Rejected(result) => Err(CliError::validation(format!(
                "brand configuration not saved: {}",
                result.summary()
            ))),
            SaveOutcome::NoConfiguration => {
                Err(CliError::failure(anyhow!("no brand configuration to save")))
            }
            SaveOutcome::Failed { error } => Err(CliError::failure(anyhow!(
                "failed to save brand configuration to {}: {error}",
                self.storage_path.display()
            ))),
        }
    }
}

/// Read a UTF-8 file supplied on the command line.
pub(crate) async fn read_input(path: &Path) -> CliResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)
}
