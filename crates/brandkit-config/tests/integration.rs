use std::collections::BTreeMap;

use brandkit_config::{
    BrandValue, ColorRole, ColorValue, ColorsPatch, MetadataPatch, StrategyPatch, ToneOfVoice,
    ValidationCode, apply_colors, apply_metadata, apply_strategy, audit_contrast,
    default_brand_configuration, export_json, parse_imported_json, validate_brand_dna,
    validate_imported_json,
};
use chrono::Utc;
use serde_json::{Value, json};

#[test]
fn edited_configuration_survives_export_and_import() -> anyhow::Result<()> {
    let base = default_brand_configuration();
    let recolored = apply_colors(
        &base,
        &ColorsPatch {
            dark: Some(BTreeMap::from([(
                ColorRole::Accent,
                ColorValue::from("160 84% 39%"),
            )])),
            ..ColorsPatch::default()
        },
    );
    let renamed = apply_metadata(
        &recolored,
        &MetadataPatch {
            name: Some("Northwind".into()),
            tagline: Some("Fresh air for teams".into()),
        },
    );
    let with_strategy = apply_strategy(
        &renamed,
        &StrategyPatch {
            values: Some(vec![BrandValue::new("Clarity", "Plain words first.")]),
            tone_of_voice: Some(ToneOfVoice {
                traits: vec!["warm".into(), "direct".into()],
            }),
            mission: Some("Make collaboration effortless.".into()),
            audience: None,
        },
    );
    assert!(validate_brand_dna(&with_strategy).valid);

    let exported = export_json(&with_strategy, Utc::now())?;
    let imported = parse_imported_json(&exported).map_err(|result| anyhow::anyhow!(result.summary()))?;
    assert_eq!(imported, with_strategy);
    assert_eq!(imported.metadata.name, "Northwind");
    Ok(())
}

#[test]
fn import_reports_every_structural_problem() -> anyhow::Result<()> {
    let exported = export_json(&default_brand_configuration(), Utc::now())?;
    let mut document: Value = serde_json::from_str(&exported)?;
    document["colors"]["light"]["primary"] = json!("#ff0000");
    document["colors"]["chart"] = json!(["0 0% 0%"]);
    document["typography"]["heading"]["weights"] = json!([]);

    let result = validate_imported_json(&document.to_string());
    assert!(!result.valid);
    assert!(result.has_code(ValidationCode::InvalidColorFormat));
    assert!(result.has_code(ValidationCode::PaletteSizeMismatch));
    assert!(result.has_code(ValidationCode::InvalidWeight));
    assert_eq!(result.errors.len(), 3);
    Ok(())
}

#[test]
fn default_palette_flags_only_light_muted_and_destructive_text() {
    let findings = audit_contrast(&default_brand_configuration());
    let flagged = findings
        .iter()
        .map(|finding| format!("{}.{}", finding.variant, finding.foreground))
        .collect::<Vec<_>>();
    assert_eq!(
        flagged,
        vec!["light.muted-foreground", "light.destructive-foreground"]
    );
    assert!(
        findings
            .iter()
            .all(|finding| finding.to_issue().code == ValidationCode::ContrastWarning)
    );
    assert!(validate_brand_dna(&default_brand_configuration()).valid);
}
