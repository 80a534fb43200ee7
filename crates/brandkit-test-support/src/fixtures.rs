//! Sample brand configurations and serialized documents.

use std::collections::BTreeMap;

use brandkit_config::{
    BrandConfiguration, BrandValue, ColorRole, ColorValue, Strategy, ToneOfVoice,
    default_brand_configuration, export_json,
};
use brandkit_fonts::{find_font, to_font_family};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

/// Fixed timestamp used by fixtures.
#[must_use]
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// A customised, structurally valid configuration.
#[must_use]
pub fn sample_brand() -> BrandConfiguration {
    let mut config = default_brand_configuration();
    config.metadata.name = "Northwind".into();
    config.metadata.tagline = "Fresh air for teams".into();
    config.metadata.created_at = fixture_time();
    config.metadata.updated_at = fixture_time();
    config.colors.light.extend(BTreeMap::from([
        (ColorRole::Primary, ColorValue::from("160 84% 30%")),
        (ColorRole::Ring, ColorValue::from("160 84% 30%")),
    ]));
    config
        .colors
        .dark
        .insert(ColorRole::Primary, ColorValue::from("160 84% 45%"));
    if let Some(font) = find_font("Playfair Display") {
        config.typography.heading = to_font_family(font);
    }
    config.strategy = Some(Strategy {
        values: vec![BrandValue {
            id: "value-clarity".into(),
            label: "Clarity".into(),
            description: "Plain words first.".into(),
        }],
        tone_of_voice: ToneOfVoice {
            traits: vec!["warm".into(), "direct".into()],
        },
        mission: Some("Make collaboration effortless.".into()),
        audience: None,
    });
    config
}

/// `sample_brand` exported with export-only metadata.
#[must_use]
pub fn sample_export_json() -> String {
    export_json(&sample_brand(), fixture_time()).unwrap_or_default()
}

/// Persisted storage record wrapping `brand` as-is.
#[must_use]
pub fn persisted_record(brand: Value) -> String {
    json!({ "state": { "brandDNA": brand }, "schemaVersion": 1 }).to_string()
}

/// Persisted record whose configuration fails structural validation.
#[must_use]
pub fn corrupt_persisted_record() -> String {
    let mut brand = serde_json::to_value(sample_brand()).unwrap_or(Value::Null);
    brand["colors"]["chart"] = json!(["0 0% 0%", "0 0% 10%", "0 0% 20%", "0 0% 30%"]);
    persisted_record(brand)
}
