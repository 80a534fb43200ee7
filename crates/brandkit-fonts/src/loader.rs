//! Idempotent stylesheet loading for live font previews.
//!
//! # Design
//! - Loading is a fetch side effect only; applying `font-family` values belongs
//!   to the scoped style renderer.
//! - One in-flight cell per URL so concurrent callers share a single injection.
//! - Failures are not cached: the next call retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::{FontError, FontResult};

/// Upper bound for a single stylesheet load.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Rendering context able to hold stylesheet references.
#[async_trait]
pub trait StylesheetHost: Send + Sync {
    /// Whether a stylesheet reference for `href` is already present.
    fn has_stylesheet(&self, href: &str) -> bool;

    /// Inject a stylesheet reference and resolve once the host reports it loaded.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::LoadFailed`] when the host reports a load failure.
    async fn inject_stylesheet(&self, href: &str) -> FontResult<()>;
}

/// Deduplicating font stylesheet loader.
pub struct FontLoader<H> {
    host: Arc<H>,
    timeout: Duration,
    inflight: Mutex<HashMap<String, Arc<OnceCell<()>>>>,
}

impl<H: StylesheetHost> FontLoader<H> {
    /// Construct a loader with the default timeout.
    #[must_use]
    pub fn new(host: Arc<H>) -> Self {
        Self::with_timeout(host, DEFAULT_LOAD_TIMEOUT)
    }

    /// Construct a loader with an explicit timeout.
    #[must_use]
    pub fn with_timeout(host: Arc<H>, timeout: Duration) -> Self {
        Self {
            host,
            timeout,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Access the underlying host.
    #[must_use]
    pub const fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Ensure the stylesheet at `href` is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::LoadFailed`] when the host reports a failure and
    /// [`FontError::Timeout`] when the host does not settle in time.
    pub async fn load(&self, href: &str) -> FontResult<()> {
        if self.host.has_stylesheet(href) {
            debug!(href, "font stylesheet already present");
            return Ok(());
        }

        let cell = {
            let mut inflight = self
                .inflight
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            Arc::clone(inflight.entry(href.to_string()).or_default())
        };

        cell.get_or_try_init(|| self.inject(href))
            .await
            .map(|_| ())
            .inspect_err(|err| warn!(href, error = %err, "font stylesheet load failed"))
    }

    async fn inject(&self, href: &str) -> FontResult<()> {
        debug!(href, "injecting font stylesheet");
        match tokio::time::timeout(self.timeout, self.host.inject_stylesheet(href)).await {
            Ok(result) => result,
            Err(_) => Err(FontError::Timeout {
                href: href.to_string(),
                after: self.timeout,
            }),
        }
    }
}
