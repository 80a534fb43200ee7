//! Theme application: scoped variables first, then font stylesheet fetches.
//!
//! # Design
//! - Only structurally valid configurations are applied.
//! - Variables are independent; a refused write is recorded and the rest are
//!   still applied. Font failures never roll back applied variables.
//! - The font loader only fetches; the `--brand-font-*` variables carry the
//!   family stacks.

use std::collections::BTreeSet;
use std::sync::Arc;

use brandkit_config::{BrandConfiguration, FontRole, TokenSet, validate_brand_dna};
use brandkit_fonts::{FontLoader, StylesheetHost, find_font, stylesheet_url};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::container::PreviewContainer;
use crate::contract::render_contract;
use crate::error::{StyleError, StyleResult};

/// Summary of one theme application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Variables written successfully.
    pub applied: usize,
    /// Names of variables the container refused.
    pub failed_variables: Vec<String>,
    /// Font stylesheets that are loaded.
    pub fonts_loaded: Vec<String>,
    /// Font load failures, one `<error>: <url>` message per stylesheet.
    pub font_errors: Vec<String>,
}

impl ApplyReport {
    /// Whether every variable and every font applied cleanly.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_variables.is_empty() && self.font_errors.is_empty()
    }

    /// Failures joined into one display line, if any.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let mut parts = self
            .failed_variables
            .iter()
            .map(|name| format!("style variable {name} was refused"))
            .collect::<Vec<_>>();
        parts.extend(self.font_errors.iter().cloned());
        Some(parts.join("; "))
    }
}

/// Distinct stylesheet URLs referenced by the configuration's fonts.
///
/// An explicit `url` wins; catalog fonts fall back to their derived URL;
/// self-hosted fonts without a URL need no fetch.
#[must_use]
pub fn font_stylesheet_urls(config: &BrandConfiguration) -> Vec<String> {
    FontRole::ALL
        .iter()
        .filter_map(|role| {
            let family = config.typography.font(*role);
            family
                .url
                .clone()
                .or_else(|| find_font(&family.name).map(stylesheet_url))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Applies configurations to preview containers.
pub struct ThemeRenderer<H> {
    fonts: Arc<FontLoader<H>>,
}

impl<H: StylesheetHost + 'static> ThemeRenderer<H> {
    /// Create a renderer that fetches fonts through `fonts`.
    #[must_use]
    pub const fn new(fonts: Arc<FontLoader<H>>) -> Self {
        Self { fonts }
    }

    /// Font loader used for stylesheet fetches.
    #[must_use]
    pub const fn fonts(&self) -> &Arc<FontLoader<H>> {
        &self.fonts
    }

    /// Write the configuration's variables into `container` and fetch its fonts.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidConfiguration`] when `config` fails
    /// structural validation; nothing is written in that case.
    #[instrument(name = "theme.apply", skip_all, fields(scope = %container.scope()))]
    pub async fn apply(
        &self,
        config: &BrandConfiguration,
        container: &dyn PreviewContainer,
    ) -> StyleResult<ApplyReport> {
        let validation = validate_brand_dna(config);
        if !validation.valid {
            return Err(StyleError::InvalidConfiguration {
                summary: validation.summary(),
            });
        }

        let contract = render_contract(config, container.scope());
        let mut report = ApplyReport::default();
        for (layer, variable) in contract.variables() {
            match container.set_property(layer, &variable.name, &variable.value) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    warn!(variable = %variable.name, error = %err, "style variable not applied");
                    report.failed_variables.push(variable.name.clone());
                }
            }
        }
        debug!(applied = report.applied, "scoped variables written");

        let mut loads = JoinSet::new();
        for href in font_stylesheet_urls(config) {
            let fonts = Arc::clone(&self.fonts);
            loads.spawn(async move {
                let result = fonts.load(&href).await;
                (href, result)
            });
        }
        while let Some(joined) = loads.join_next().await {
            match joined {
                Ok((href, Ok(()))) => report.fonts_loaded.push(href),
                Ok((href, Err(err))) => report.font_errors.push(format!("{err}: {href}")),
                Err(err) => {
                    warn!(error = %err, "font load task aborted");
                    report.font_errors.push(format!("font load task aborted: {err}"));
                }
            }
        }
        report.fonts_loaded.sort();
        report.font_errors.sort();

        info!(
            applied = report.applied,
            failed = report.failed_variables.len(),
            fonts = report.fonts_loaded.len(),
            font_errors = report.font_errors.len(),
            "theme applied"
        );
        Ok(report)
    }
}
