use std::sync::Arc;

use brandkit_config::{ColorRole, ColorValue, default_brand_configuration};
use brandkit_fonts::FontLoader;
use brandkit_test_support::mocks::RecordingHost;
use brandkit_theme::{
    PreviewContainer, PreviewScope, ScopedStyleSheet, StyleError, StyleLayer, StyleResult,
    ThemeRenderer,
};

struct RefusingContainer {
    inner: ScopedStyleSheet,
    refuse: &'static str,
}

impl PreviewContainer for RefusingContainer {
    fn scope(&self) -> &PreviewScope {
        self.inner.scope()
    }

    fn set_property(&self, layer: StyleLayer, name: &str, value: &str) -> StyleResult<()> {
        if name == self.refuse {
            return Err(StyleError::Property {
                name: name.to_string(),
                reason: "read-only".into(),
            });
        }
        self.inner.set_property(layer, name, value)
    }
}

fn renderer(host: RecordingHost) -> (Arc<RecordingHost>, ThemeRenderer<RecordingHost>) {
    let host = Arc::new(host);
    let loader = Arc::new(FontLoader::new(Arc::clone(&host)));
    (host, ThemeRenderer::new(loader))
}

#[tokio::test]
async fn apply_writes_scoped_variables_and_fetches_fonts() -> anyhow::Result<()> {
    let (host, renderer) = renderer(RecordingHost::new());
    let sheet = ScopedStyleSheet::new(PreviewScope::new("tenant-a")?);
    let config = default_brand_configuration();

    let report = renderer.apply(&config, &sheet).await?;
    assert!(report.is_complete());
    assert_eq!(report.applied, sheet.len());
    assert_eq!(report.fonts_loaded.len(), 3);
    assert_eq!(host.injections(), 3);
    assert_eq!(
        sheet.get(StyleLayer::Base, "--brand-background").as_deref(),
        Some("0 0% 100%")
    );
    assert!(sheet.to_css().starts_with("[data-brand-preview=\"tenant-a\"] {"));

    renderer.apply(&config, &sheet).await?;
    assert_eq!(host.injections(), 3);
    Ok(())
}

#[tokio::test]
async fn invalid_configuration_is_not_applied() -> anyhow::Result<()> {
    let (host, renderer) = renderer(RecordingHost::new());
    let sheet = ScopedStyleSheet::new(PreviewScope::default());
    let mut config = default_brand_configuration();
    config
        .colors
        .light
        .insert(ColorRole::Ring, ColorValue::from("not a color"));

    let err = renderer
        .apply(&config, &sheet)
        .await
        .expect_err("invalid configuration rejected");
    assert!(matches!(err, StyleError::InvalidConfiguration { .. }));
    assert!(sheet.is_empty());
    assert_eq!(host.injections(), 0);
    Ok(())
}

#[tokio::test]
async fn font_failure_keeps_applied_variables() -> anyhow::Result<()> {
    let host = RecordingHost::new();
    host.fail_matching("Merriweather");
    let (host, renderer) = renderer(host);
    let sheet = ScopedStyleSheet::new(PreviewScope::default());
    let report = renderer.apply(&default_brand_configuration(), &sheet).await?;

    assert_eq!(report.font_errors.len(), 1);
    assert!(report.font_errors[0].contains("Merriweather"));
    assert_eq!(report.fonts_loaded.len(), 2);
    assert_eq!(host.present().len(), 2);
    assert!(report.failed_variables.is_empty());
    assert_eq!(
        sheet.get(StyleLayer::Base, "--brand-primary").as_deref(),
        Some("221.2 83.2% 53.3%")
    );
    Ok(())
}

#[tokio::test]
async fn refused_variable_does_not_stop_the_rest() -> anyhow::Result<()> {
    let (_, renderer) = renderer(RecordingHost::new());
    let container = RefusingContainer {
        inner: ScopedStyleSheet::new(PreviewScope::default()),
        refuse: "--brand-ring",
    };
    let report = renderer
        .apply(&default_brand_configuration(), &container)
        .await?;

    assert_eq!(report.failed_variables, vec!["--brand-ring".to_string(); 2]);
    assert_eq!(report.applied, container.inner.len());
    assert!(container.inner.get(StyleLayer::Base, "--brand-ring").is_none());
    assert!(container.inner.get(StyleLayer::Base, "--brand-input").is_some());
    Ok(())
}

#[tokio::test]
async fn breaking_length_values_never_reach_the_stylesheet() -> anyhow::Result<()> {
    let (host, renderer) = renderer(RecordingHost::new());
    let sheet = ScopedStyleSheet::new(PreviewScope::default());
    let mut config = default_brand_configuration();
    config.typography.scale.insert(
        brandkit_config::ScaleToken::Xs,
        "1rem } :root { --brand-primary: 0 100% 50%".into(),
    );

    let err = renderer
        .apply(&config, &sheet)
        .await
        .expect_err("breaking value rejected");
    assert!(matches!(err, StyleError::InvalidConfiguration { .. }));
    assert!(!sheet.to_css().contains(":root"));
    assert_eq!(host.injections(), 0);
    Ok(())
}
