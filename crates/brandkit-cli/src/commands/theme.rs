//! Preview stylesheet rendering.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use brandkit_config::is_safe_stylesheet_url;
use brandkit_fonts::{FontError, FontLoader, FontResult, StylesheetHost};
use brandkit_theme::{ApplyReport, PreviewScope, ScopedStyleSheet, ThemeRenderer};

use crate::cli::OutputFormat;
use crate::context::{AppContext, CliError, CliResult};
use crate::output::render_stylesheet;

/// Collects font stylesheets as `@import` targets for the emitted CSS.
#[derive(Debug, Default)]
pub(crate) struct ImportCollector {
    imports: Mutex<BTreeSet<String>>,
}

impl ImportCollector {
    pub(crate) fn imports(&self) -> Vec<String> {
        self.imports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StylesheetHost for ImportCollector {
    fn has_stylesheet(&self, href: &str) -> bool {
        self.imports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(href)
    }

    async fn inject_stylesheet(&self, href: &str) -> FontResult<()> {
        if !is_safe_stylesheet_url(href) {
            return Err(FontError::LoadFailed {
                href: href.to_string(),
                reason: "only plain https stylesheets can be imported".into(),
            });
        }
        self.imports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(href.to_string());
        Ok(())
    }
}

/// Everything `render` prints: font imports, scoped CSS, and the apply report.
#[derive(Debug)]
pub(crate) struct RenderedPreview {
    pub(crate) imports: Vec<String>,
    pub(crate) css: String,
    pub(crate) report: ApplyReport,
}

pub(crate) async fn handle_render(
    ctx: &AppContext,
    preview_id: &str,
    font_timeout: Duration,
    format: OutputFormat,
) -> CliResult<()> {
    let preview = render_preview(ctx, preview_id, font_timeout).await?;
    render_stylesheet(&preview.imports, &preview.css, &preview.report, format)
}

pub(crate) async fn render_preview(
    ctx: &AppContext,
    preview_id: &str,
    font_timeout: Duration,
) -> CliResult<RenderedPreview> {
    let scope = PreviewScope::new(preview_id).map_err(|err| CliError::validation(err.to_string()))?;
    if let Some(result) = ctx.store.validate()
        && !result.valid
    {
        return Err(CliError::validation(format!(
            "stored configuration is invalid: {}",
            result.summary()
        )));
    }

    let host = Arc::new(ImportCollector::default());
    let loader = FontLoader::with_timeout(Arc::clone(&host), font_timeout);
    let renderer = ThemeRenderer::new(Arc::new(loader));
    let sheet = ScopedStyleSheet::new(scope);
    let report = ctx.store.apply_theme(&renderer, &sheet).await.ok_or_else(|| {
        let reason = ctx
            .store
            .state()
            .error
            .unwrap_or_else(|| "no brand configuration loaded".to_string());
        CliError::failure(anyhow!("theme not rendered: {reason}"))
    })?;
    Ok(RenderedPreview {
        imports: host.imports(),
        css: sheet.to_css(),
        report,
    })
}
