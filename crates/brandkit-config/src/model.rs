//! Typed Brand DNA models and partial-update payloads.
//!
//! # Design
//! - Pure data carriers; validation lives in `validate.rs`, merges in `merge.rs`.
//! - Closed sets are maps keyed by token enums so a missing key is representable
//!   and reported by validation rather than rejected during decoding.

use std::collections::BTreeMap;

use brandkit_fonts::FontFamily;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::color::ColorValue;
use crate::tokens::{
    ColorRole, FontRole, LetterSpacingPreset, LineHeightPreset, RadiusToken, ScaleToken,
    SpacingToken, ThemeVariant,
};

/// Color assignments for one theme variant.
pub type ThemeColors = BTreeMap<ColorRole, ColorValue>;

/// Decode a palette, dropping keys that name no known role.
fn known_roles<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ThemeColors, D::Error> {
    let raw = BTreeMap::<String, ColorValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, color)| key.parse::<ColorRole>().ok().map(|role| (role, color)))
        .collect())
}

/// Aggregate root describing a tenant's visual identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfiguration {
    /// Theme palettes and chart colors.
    pub colors: BrandColors,
    /// Font roles and type scale.
    pub typography: Typography,
    /// Radius and spacing scales.
    pub spacing: Spacing,
    /// Logos and other brand imagery.
    #[serde(default)]
    pub assets: Assets,
    /// Naming and timestamps.
    pub metadata: Metadata,
    /// Optional strategic positioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
}

/// Light/dark palettes plus the chart palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    /// Light theme role assignments.
    #[serde(deserialize_with = "known_roles")]
    pub light: ThemeColors,
    /// Dark theme role assignments.
    #[serde(deserialize_with = "known_roles")]
    pub dark: ThemeColors,
    /// Chart series colors; exactly five entries when valid.
    pub chart: Vec<ColorValue>,
}

impl BrandColors {
    /// Role assignments for `variant`.
    #[must_use]
    pub const fn theme(&self, variant: ThemeVariant) -> &ThemeColors {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }
}

/// Font roles and typographic scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Heading font.
    pub heading: FontFamily,
    /// Body copy font.
    pub body: FontFamily,
    /// Code and tabular font.
    pub mono: FontFamily,
    /// Size token to CSS length.
    pub scale: BTreeMap<ScaleToken, String>,
    /// Line height preset to unitless multiplier.
    pub line_height: BTreeMap<LineHeightPreset, f64>,
    /// Letter spacing preset to CSS length.
    pub letter_spacing: BTreeMap<LetterSpacingPreset, String>,
}

impl Typography {
    /// Font family assigned to `role`.
    #[must_use]
    pub const fn font(&self, role: FontRole) -> &FontFamily {
        match role {
            FontRole::Heading => &self.heading,
            FontRole::Body => &self.body,
            FontRole::Mono => &self.mono,
        }
    }
}

/// Radius and spacing scales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Corner radius preset to CSS length.
    pub radius: BTreeMap<RadiusToken, String>,
    /// Spacing preset to CSS length.
    pub spacing: BTreeMap<SpacingToken, String>,
}

/// Brand imagery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Primary logo with per-theme sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Favicon source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Additional brand images.
    #[serde(default)]
    pub images: Vec<BrandImage>,
}

/// Primary logo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Source rendered on light backgrounds.
    pub light: String,
    /// Source rendered on dark backgrounds.
    pub dark: String,
    /// Alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Additional brand image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandImage {
    /// Stable identifier.
    pub id: String,
    /// Image source.
    pub url: String,
    /// Alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Naming and lifecycle timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Brand name.
    pub name: String,
    /// Short tagline.
    #[serde(default)]
    pub tagline: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last successful mutation instant; never decreases.
    pub updated_at: DateTime<Utc>,
}

/// Strategic positioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Ordered brand values.
    #[serde(default)]
    pub values: Vec<BrandValue>,
    /// Voice guidance.
    #[serde(default)]
    pub tone_of_voice: ToneOfVoice,
    /// Mission statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    /// Target audience description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

/// One brand value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandValue {
    /// Stable identifier used by list operations.
    pub id: String,
    /// Short label.
    pub label: String,
    /// Longer explanation.
    #[serde(default)]
    pub description: String,
}

impl BrandValue {
    /// Create a value with a freshly generated identifier.
    #[must_use]
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Voice guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneOfVoice {
    /// Descriptive traits, e.g. "warm" or "precise".
    #[serde(default)]
    pub traits: Vec<String>,
}

/// Partial update for [`BrandColors`]; theme maps merge key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsPatch {
    /// Light theme roles to overwrite.
    pub light: Option<ThemeColors>,
    /// Dark theme roles to overwrite.
    pub dark: Option<ThemeColors>,
    /// Replacement chart palette.
    pub chart: Option<Vec<ColorValue>>,
}

/// Partial update for [`Typography`]; scale maps merge key by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyPatch {
    /// Replacement heading font.
    pub heading: Option<FontFamily>,
    /// Replacement body font.
    pub body: Option<FontFamily>,
    /// Replacement mono font.
    pub mono: Option<FontFamily>,
    /// Scale entries to overwrite.
    pub scale: Option<BTreeMap<ScaleToken, String>>,
    /// Line height entries to overwrite.
    pub line_height: Option<BTreeMap<LineHeightPreset, f64>>,
    /// Letter spacing entries to overwrite.
    pub letter_spacing: Option<BTreeMap<LetterSpacingPreset, String>>,
}

/// Partial update for [`Spacing`]; both maps merge key by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingPatch {
    /// Radius entries to overwrite.
    pub radius: Option<BTreeMap<RadiusToken, String>>,
    /// Spacing entries to overwrite.
    pub spacing: Option<BTreeMap<SpacingToken, String>>,
}

/// Partial update for [`Assets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsPatch {
    /// Replacement logo.
    pub logo: Option<Logo>,
    /// Replacement favicon.
    pub favicon: Option<String>,
    /// Replacement image list.
    pub images: Option<Vec<BrandImage>>,
}

/// Partial update for [`Metadata`]; timestamps are managed by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement tagline.
    pub tagline: Option<String>,
}

/// Partial update for [`Strategy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyPatch {
    /// Replacement value list.
    pub values: Option<Vec<BrandValue>>,
    /// Replacement voice guidance.
    pub tone_of_voice: Option<ToneOfVoice>,
    /// Replacement mission statement.
    pub mission: Option<String>,
    /// Replacement audience description.
    pub audience: Option<String>,
}

/// Partial update for one [`BrandValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandValuePatch {
    /// Replacement label.
    pub label: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}
