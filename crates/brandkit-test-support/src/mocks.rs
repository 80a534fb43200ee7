//! Fake collaborators for integration suites.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use brandkit_fonts::{FontError, FontResult, StylesheetHost};

/// Stylesheet host that records injections and can fail selected URLs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    present: Mutex<BTreeSet<String>>,
    injections: AtomicUsize,
    failing: Mutex<Vec<String>>,
}

impl RecordingHost {
    /// Host with no stylesheets present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every URL containing `needle` fail to load.
    pub fn fail_matching(&self, needle: impl Into<String>) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(needle.into());
    }

    /// Number of injection attempts so far.
    #[must_use]
    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    /// Stylesheets currently present.
    #[must_use]
    pub fn present(&self) -> Vec<String> {
        self.present
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StylesheetHost for RecordingHost {
    fn has_stylesheet(&self, href: &str) -> bool {
        self.present
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(href)
    }

    async fn inject_stylesheet(&self, href: &str) -> FontResult<()> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        let fails = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|needle| href.contains(needle.as_str()));
        if fails {
            return Err(FontError::LoadFailed {
                href: href.to_string(),
                reason: "simulated network failure".into(),
            });
        }
        self.present
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(href.to_string());
        Ok(())
    }
}
