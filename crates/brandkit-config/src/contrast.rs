//! Advisory WCAG 2.1 contrast checks.
//!
//! Contrast findings never block a save, import, or theme application; they are
//! surfaced next to the configuration for display only.

use serde::Serialize;

use crate::color::ColorValue;
use crate::error::ConfigResult;
use crate::model::BrandConfiguration;
use crate::tokens::{ColorRole, ThemeVariant, TokenSet};
use crate::validate::{ValidationCode, ValidationIssue};

/// WCAG conformance levels for text contrast, ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WcagLevel {
    /// Large text at level AA (3:1).
    #[serde(rename = "AA-large")]
    AaLarge,
    /// Normal text at level AA (4.5:1).
    #[serde(rename = "AA-normal")]
    AaNormal,
    /// Normal text at level AAA (7:1).
    #[serde(rename = "AAA-normal")]
    AaaNormal,
}

impl WcagLevel {
    /// Levels from strictest to weakest.
    pub const DESCENDING: [Self; 3] = [Self::AaaNormal, Self::AaNormal, Self::AaLarge];

    /// Minimum ratio required by the level.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::AaLarge => 3.0,
            Self::AaNormal => 4.5,
            Self::AaaNormal => 7.0,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AaLarge => "AA-large",
            Self::AaNormal => "AA-normal",
            Self::AaaNormal => "AAA-normal",
        }
    }
}

/// Computed contrast between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastReport {
    /// Contrast ratio in `1.0..=21.0`.
    pub ratio: f64,
    /// Highest level met, if any.
    pub level: Option<WcagLevel>,
}

impl ContrastReport {
    /// Classify a raw ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        let level = WcagLevel::DESCENDING
            .into_iter()
            .find(|level| ratio >= level.threshold());
        Self { ratio, level }
    }

    /// Whether the ratio satisfies `level`.
    #[must_use]
    pub fn meets(&self, level: WcagLevel) -> bool {
        self.ratio >= level.threshold()
    }
}

/// Compute the WCAG contrast ratio between two colors, in either order.
///
/// # Errors
///
/// Returns [`crate::ConfigError::InvalidColor`] when either color is not a
/// valid HSL triple.
pub fn check_contrast(first: &ColorValue, second: &ColorValue) -> ConfigResult<ContrastReport> {
    let first = first.parse()?.relative_luminance();
    let second = second.parse()?.relative_luminance();
    let (lighter, darker) = if first >= second {
        (first, second)
    } else {
        (second, first)
    };
    Ok(ContrastReport::from_ratio((lighter + 0.05) / (darker + 0.05)))
}

/// A role pair that misses AA for normal text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastFinding {
    /// Theme the pair belongs to.
    pub variant: ThemeVariant,
    /// Surface role.
    pub background: ColorRole,
    /// Text role drawn on the surface.
    pub foreground: ColorRole,
    /// Computed contrast.
    pub report: ContrastReport,
}

impl ContrastFinding {
    /// Render as an advisory `CONTRAST_WARNING` issue.
    #[must_use]
    pub fn to_issue(&self) -> ValidationIssue {
        let met = self
            .report
            .level
            .map_or_else(|| "no WCAG level".to_string(), |level| format!("{} only", level.as_str()));
        ValidationIssue::new(
            ValidationCode::ContrastWarning,
            format!("colors.{}.{}", self.variant, self.foreground),
            format!(
                "contrast {:.2}:1 on '{}' meets {met}",
                self.report.ratio, self.background
            ),
        )
    }
}

/// Check every surface/text pair in both themes and report those below AA-normal.
///
/// Pairs with a missing or malformed color are skipped; structural validation
/// reports those.
#[must_use]
pub fn audit_contrast(config: &BrandConfiguration) -> Vec<ContrastFinding> {
    let mut findings = Vec::new();
    for variant in ThemeVariant::ALL {
        let theme = config.colors.theme(*variant);
        for background in ColorRole::ALL {
            let Some(foreground) = background.foreground_pair() else {
                continue;
            };
            let (Some(bg), Some(fg)) = (theme.get(background), theme.get(&foreground)) else {
                continue;
            };
            let Ok(report) = check_contrast(fg, bg) else {
                continue;
            };
            if !report.meets(WcagLevel::AaNormal) {
                findings.push(ContrastFinding {
                    variant: *variant,
                    background: *background,
                    foreground,
                    report,
                });
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_brand_configuration;

    #[test]
    fn black_on_white_is_twenty_one_to_one() {
        let report = check_contrast(&ColorValue::from("0 0% 0%"), &ColorValue::from("0 0% 100%"))
            .expect("valid colors");
        assert!((report.ratio - 21.0).abs() < 0.01);
        assert_eq!(report.level, Some(WcagLevel::AaaNormal));
        assert!(report.meets(WcagLevel::AaNormal));
    }

    #[test]
    fn ratio_is_order_independent() {
        let a = ColorValue::from("221.2 83.2% 53.3%");
        let b = ColorValue::from("210 40% 98%");
        let forward = check_contrast(&a, &b).expect("valid");
        let backward = check_contrast(&b, &a).expect("valid");
        assert!((forward.ratio - backward.ratio).abs() < 1e-12);
    }

    #[test]
    fn identical_colors_meet_no_level() {
        let gray = ColorValue::from("0 0% 50%");
        let report = check_contrast(&gray, &gray).expect("valid");
        assert!((report.ratio - 1.0).abs() < 1e-12);
        assert_eq!(report.level, None);
    }

    #[test]
    fn thresholds_classify_boundaries() {
        assert_eq!(ContrastReport::from_ratio(4.5).level, Some(WcagLevel::AaNormal));
        assert_eq!(ContrastReport::from_ratio(3.0).level, Some(WcagLevel::AaLarge));
        assert_eq!(ContrastReport::from_ratio(6.99).level, Some(WcagLevel::AaNormal));
        assert_eq!(ContrastReport::from_ratio(2.99).level, None);
    }

    #[test]
    fn invalid_color_is_an_error() {
        assert!(check_contrast(&ColorValue::from("#000"), &ColorValue::from("0 0% 0%")).is_err());
    }

    #[test]
    fn audit_flags_low_contrast_pairs_as_warnings() {
        let mut config = default_brand_configuration();
        config
            .colors
            .light
            .insert(ColorRole::PrimaryForeground, ColorValue::from("221.2 83.2% 60%"));
        let findings = audit_contrast(&config);
        let finding = findings
            .iter()
            .find(|finding| {
                finding.variant == ThemeVariant::Light && finding.background == ColorRole::Primary
            })
            .expect("primary pair flagged");
        let issue = finding.to_issue();
        assert_eq!(issue.code, ValidationCode::ContrastWarning);
        assert_eq!(issue.field, "colors.light.primary-foreground");
        assert!(issue.message.contains("meets no WCAG level"));
    }
}
