//! Structural validation for Brand DNA configurations and imported documents.
//!
//! # Design
//! - Validation reports, it never repairs: every violation becomes one issue.
//! - Closed sets are walked through `TokenSet::ALL` so the validator, default
//!   factory, and renderer agree on the keys.
//! - Failures are data (`ValidationResult`), never panics or errors.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use brandkit_fonts::find_font;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::export::EXPORT_ONLY_FIELDS;
use crate::model::BrandConfiguration;
use crate::tokens::{
    ColorRole, FontRole, LetterSpacingPreset, LineHeightPreset, RadiusToken, SpacingToken,
    ThemeVariant, TokenSet,
};

/// Number of entries a chart palette must carry.
pub const CHART_PALETTE_SIZE: usize = 5;

/// Weights accepted for families outside the catalog (self-hosted fonts).
pub const CSS_NUMERIC_WEIGHTS: &[u16] = &[100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Machine-readable validation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// A key of a closed set (or a required field) is absent.
    MissingField,
    /// A color is not an `"H S% L%"` triple.
    InvalidColorFormat,
    /// A font weight list is empty or names an unavailable weight.
    InvalidWeight,
    /// The chart palette does not have exactly five entries.
    PaletteSizeMismatch,
    /// A value has the wrong shape or an unusable content.
    InvalidField,
    /// Imported text is not JSON.
    ImportParseError,
    /// Advisory: a color pair misses the AA-normal contrast threshold.
    ContrastWarning,
}

impl ValidationCode {
    /// Wire spelling of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidColorFormat => "INVALID_COLOR_FORMAT",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::PaletteSizeMismatch => "PALETTE_SIZE_MISMATCH",
            Self::InvalidField => "INVALID_FIELD",
            Self::ImportParseError => "IMPORT_PARSE_ERROR",
            Self::ContrastWarning => "CONTRAST_WARNING",
        }
    }
}

impl Display for ValidationCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (`$` for the document root).
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Machine-readable code.
    pub code: ValidationCode,
}

impl ValidationIssue {
    /// Construct an issue.
    #[must_use]
    pub fn new(code: ValidationCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no blocking issues were found.
    pub valid: bool,
    /// Issues in discovery order.
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from collected issues.
    #[must_use]
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// A failing result carrying a single issue.
    #[must_use]
    pub fn single(code: ValidationCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_issues(vec![ValidationIssue::new(code, field, message)])
    }

    /// Whether any issue carries `code`.
    #[must_use]
    pub fn has_code(&self, code: ValidationCode) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }

    /// Messages joined for display in a single status line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

const CSS_BREAKING_CHARS: [char; 9] = [';', '{', '}', '"', '\'', '\\', '<', '\n', '\r'];
const URL_BREAKING_CHARS: [char; 6] = ['"', '\'', '\\', '<', '>', '`'];

/// Whether `value` can sit inside a CSS declaration without ending it.
#[must_use]
pub fn is_plain_css_value(value: &str) -> bool {
    !value.contains(CSS_BREAKING_CHARS) && !value.contains("/*") && !value.contains("*/")
}

/// Whether `url` is an absolute `https` address that is safe to emit inside
/// `@import url("...")`.
#[must_use]
pub fn is_safe_stylesheet_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("https://") else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty()
        && !url.chars().any(char::is_whitespace)
        && !url.contains(URL_BREAKING_CHARS)
        && !url.contains("/*")
        && !url.contains("*/")
}

/// Check structural completeness of `config`.
#[must_use]
pub fn validate_brand_dna(config: &BrandConfiguration) -> ValidationResult {
    let mut errors = Vec::new();
    validate_colors(config, &mut errors);
    validate_fonts(config, &mut errors);

    let typography = &config.typography;
    check_lengths(&typography.scale, "typography.scale", &mut errors);
    check_line_heights(&typography.line_height, &mut errors);
    check_lengths::<LetterSpacingPreset>(
        &typography.letter_spacing,
        "typography.letterSpacing",
        &mut errors,
    );
    check_lengths::<RadiusToken>(&config.spacing.radius, "spacing.radius", &mut errors);
    check_lengths::<SpacingToken>(&config.spacing.spacing, "spacing.spacing", &mut errors);

    ValidationResult::from_issues(errors)
}

/// Decode an already-parsed JSON object into a configuration and validate it.
///
/// # Errors
///
/// Returns the failing [`ValidationResult`] when the value cannot be decoded or
/// does not pass structural validation.
pub fn decode_brand_value(value: Value) -> Result<BrandConfiguration, ValidationResult> {
    let config = serde_path_to_error::deserialize::<_, BrandConfiguration>(value)
        .map_err(|err| ValidationResult::from_issues(vec![decode_issue(&err)]))?;
    let result = validate_brand_dna(&config);
    if result.valid { Ok(config) } else { Err(result) }
}

/// Parse imported JSON text, drop export-only fields, and validate.
///
/// # Errors
///
/// Returns an `IMPORT_PARSE_ERROR` result when `input` is not JSON, and the
/// structural result when the document is not a valid configuration.
pub fn parse_imported_json(input: &str) -> Result<BrandConfiguration, ValidationResult> {
    let mut value = serde_json::from_str::<Value>(input).map_err(|err| {
        ValidationResult::single(
            ValidationCode::ImportParseError,
            "$",
            format!("import is not valid JSON: {err}"),
        )
    })?;
    let Some(object) = value.as_object_mut() else {
        return Err(ValidationResult::single(
            ValidationCode::InvalidField,
            "$",
            "import must be a JSON object",
        ));
    };
    for field in EXPORT_ONLY_FIELDS {
        object.remove(*field);
    }
    decode_brand_value(value)
}

/// Validate imported JSON text without keeping the decoded configuration.
#[must_use]
pub fn validate_imported_json(input: &str) -> ValidationResult {
    match parse_imported_json(input) {
        Ok(_) => ValidationResult::ok(),
        Err(result) => result,
    }
}

fn validate_colors(config: &BrandConfiguration, errors: &mut Vec<ValidationIssue>) {
    for variant in ThemeVariant::ALL {
        let theme = config.colors.theme(*variant);
        for role in ColorRole::ALL {
            let field = format!("colors.{variant}.{role}");
            match theme.get(role) {
                None => errors.push(ValidationIssue::new(
                    ValidationCode::MissingField,
                    field,
                    format!("missing {variant} color for '{role}'"),
                )),
                Some(color) => {
                    if let Err(err) = color.parse() {
                        errors.push(ValidationIssue::new(
                            ValidationCode::InvalidColorFormat,
                            field,
                            err.to_string(),
                        ));
                    }
                }
            }
        }
    }

    let chart = &config.colors.chart;
    if chart.len() != CHART_PALETTE_SIZE {
        errors.push(ValidationIssue::new(
            ValidationCode::PaletteSizeMismatch,
            "colors.chart",
            format!(
                "chart palette must contain exactly {CHART_PALETTE_SIZE} colors (found {})",
                chart.len()
            ),
        ));
    }
    for (index, color) in chart.iter().enumerate() {
        if let Err(err) = color.parse() {
            errors.push(ValidationIssue::new(
                ValidationCode::InvalidColorFormat,
                format!("colors.chart[{index}]"),
                err.to_string(),
            ));
        }
    }
}

fn validate_fonts(config: &BrandConfiguration, errors: &mut Vec<ValidationIssue>) {
    for role in FontRole::ALL {
        let font = config.typography.font(*role);
        if font.name.trim().is_empty() {
            errors.push(ValidationIssue::new(
                ValidationCode::MissingField,
                format!("typography.{role}.name"),
                format!("{role} font needs a family name"),
            ));
        } else if !is_plain_css_value(&font.name) {
            errors.push(ValidationIssue::new(
                ValidationCode::InvalidField,
                format!("typography.{role}.name"),
                format!("{role} font name contains characters not allowed in CSS"),
            ));
        }
        for (index, fallback) in font.fallback.iter().enumerate() {
            if fallback.trim().is_empty() || !is_plain_css_value(fallback) {
                errors.push(ValidationIssue::new(
                    ValidationCode::InvalidField,
                    format!("typography.{role}.fallback[{index}]"),
                    format!("fallback '{fallback}' is not a usable family name"),
                ));
            }
        }
        if let Some(url) = &font.url
            && !is_safe_stylesheet_url(url)
        {
            errors.push(ValidationIssue::new(
                ValidationCode::InvalidField,
                format!("typography.{role}.url"),
                format!("{role} font url must be an https address without quotes or spaces"),
            ));
        }

        let field = format!("typography.{role}.weights");
        if font.weights.is_empty() {
            errors.push(ValidationIssue::new(
                ValidationCode::InvalidWeight,
                field,
                format!("{role} font needs at least one weight"),
            ));
            continue;
        }

        let available = find_font(&font.name).map_or(CSS_NUMERIC_WEIGHTS, |entry| entry.weights);
        for weight in &font.weights {
            if !available.contains(weight) {
                errors.push(ValidationIssue::new(
                    ValidationCode::InvalidWeight,
                    field.clone(),
                    format!(
                        "weight {weight} is not available for '{}' (available: {})",
                        font.name,
                        join_weights(available)
                    ),
                ));
            }
        }
    }
}

fn check_lengths<T: TokenSet + Display>(
    map: &BTreeMap<T, String>,
    path: &str,
    errors: &mut Vec<ValidationIssue>,
) {
    for token in T::ALL {
        match map.get(token) {
            None => errors.push(ValidationIssue::new(
                ValidationCode::MissingField,
                format!("{path}.{token}"),
                format!("missing {} '{token}'", T::SET),
            )),
            Some(value) if value.trim().is_empty() => errors.push(ValidationIssue::new(
                ValidationCode::InvalidField,
                format!("{path}.{token}"),
                format!("{} '{token}' must not be empty", T::SET),
            )),
            Some(value) if !is_plain_css_value(value) => errors.push(ValidationIssue::new(
                ValidationCode::InvalidField,
                format!("{path}.{token}"),
                format!("{} '{token}' contains characters not allowed in CSS", T::SET),
            )),
            Some(_) => {}
        }
    }
}

fn check_line_heights(map: &BTreeMap<LineHeightPreset, f64>, errors: &mut Vec<ValidationIssue>) {
    for preset in LineHeightPreset::ALL {
        let field = format!("typography.lineHeight.{preset}");
        match map.get(preset) {
            None => errors.push(ValidationIssue::new(
                ValidationCode::MissingField,
                field,
                format!("missing line height preset '{preset}'"),
            )),
            Some(value) if !value.is_finite() || *value <= 0.0 => {
                errors.push(ValidationIssue::new(
                    ValidationCode::InvalidField,
                    field,
                    format!("line height '{preset}' must be a positive number"),
                ));
            }
            Some(_) => {}
        }
    }
}

fn join_weights(weights: &[u16]) -> String {
    weights
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn decode_issue(err: &serde_path_to_error::Error<serde_json::Error>) -> ValidationIssue {
    let path = err.path().to_string();
    let parent = if path == "." { None } else { Some(path) };
    let message = err.inner().to_string();
    if let Some(rest) = message.strip_prefix("missing field `") {
        let leaf = rest.split('`').next().unwrap_or_default();
        let field = match parent {
            Some(parent) => format!("{parent}.{leaf}"),
            None => leaf.to_string(),
        };
        return ValidationIssue::new(ValidationCode::MissingField, field, message.clone());
    }
    let field = parent.unwrap_or_else(|| "$".to_string());
    ValidationIssue::new(ValidationCode::InvalidField, field, message)
}
