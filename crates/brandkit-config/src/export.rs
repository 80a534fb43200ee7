//! Export document: the configuration plus export metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};
use crate::model::BrandConfiguration;

/// Version stamped into every exported document.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Top-level keys added on export and ignored on import.
pub const EXPORT_ONLY_FIELDS: &[&str] = &["exportedAt", "exportVersion"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(flatten)]
    brand: &'a BrandConfiguration,
    exported_at: String,
    export_version: &'static str,
}

/// Serialise `config` as pretty-printed JSON with `exportedAt`/`exportVersion`.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialisation fails.
pub fn export_json(config: &BrandConfiguration, now: DateTime<Utc>) -> ConfigResult<String> {
    let document = ExportDocument {
        brand: config,
        exported_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        export_version: EXPORT_VERSION,
    };
    serde_json::to_string_pretty(&document).map_err(|source| ConfigError::Serialize {
        operation: "export brand configuration",
        source,
    })
}
