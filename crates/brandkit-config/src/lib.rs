#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Brand DNA configuration: value types, defaults, validation, and merges.
//!
//! Layout: `tokens.rs` (closed token sets shared by every consumer),
//! `color.rs` (HSL color values), `model.rs` (configuration and patch types),
//! `defaults.rs` (default factory), `validate.rs` (structural and import
//! validation), `contrast.rs` (advisory WCAG checks), `merge.rs` (pure
//! partial-update functions), `export.rs` (import/export document format).

pub mod color;
pub mod contrast;
pub mod defaults;
pub mod error;
pub mod export;
pub mod merge;
pub mod model;
pub mod tokens;
pub mod validate;

pub use color::{ColorValue, Hsl};
pub use contrast::{ContrastFinding, ContrastReport, WcagLevel, audit_contrast, check_contrast};
pub use defaults::default_brand_configuration;
pub use error::{ConfigError, ConfigResult};
pub use export::{EXPORT_VERSION, export_json};
pub use merge::{
    add_value, apply_assets, apply_colors, apply_metadata, apply_spacing, apply_strategy,
    apply_typography, remove_value, stamp_updated, update_value,
};
pub use model::{
    Assets, AssetsPatch, BrandColors, BrandConfiguration, BrandImage, BrandValue, BrandValuePatch,
    ColorsPatch, Logo, Metadata, MetadataPatch, Spacing, SpacingPatch, Strategy, StrategyPatch,
    ThemeColors, ToneOfVoice, Typography, TypographyPatch,
};
pub use tokens::{
    ColorRole, FontRole, LetterSpacingPreset, LineHeightPreset, RadiusToken, ScaleToken, SpacingToken,
    ThemeVariant, TokenSet, UnknownToken,
};
pub use validate::{
    ValidationCode, ValidationIssue, ValidationResult, decode_brand_value, is_plain_css_value,
    is_safe_stylesheet_url, parse_imported_json, validate_brand_dna, validate_imported_json,
};
