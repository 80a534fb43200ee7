//! HSL color values stored as `"H S% L%"` strings.
//!
//! # Design
//! - Colors stay HSL end to end so tints/shades are a lightness change and
//!   contrast math needs no hex parsing.
//! - `ColorValue` keeps the raw string; parsing is explicit so invalid input
//!   survives decoding and is reported by validation instead of being repaired.

use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

static HSL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)%\s+(\d+(?:\.\d+)?)%\s*$").ok()
});

/// A color encoded as an HSL triple string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(String);

impl ColorValue {
    /// Wrap a raw string without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into numeric HSL components.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] when the string is not `"H S% L%"`
    /// with hue in `0..=360` and saturation/lightness in `0..=100`.
    pub fn parse(&self) -> ConfigResult<Hsl> {
        Hsl::parse(&self.0)
    }

    /// Whether the value parses as a valid HSL triple.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.parse().is_ok()
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Hsl> for ColorValue {
    fn from(value: Hsl) -> Self {
        Self(value.to_string())
    }
}

impl Display for ColorValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Numeric HSL components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `0..=360`.
    pub hue: f64,
    /// Saturation percentage, `0..=100`.
    pub saturation: f64,
    /// Lightness percentage, `0..=100`.
    pub lightness: f64,
}

impl Hsl {
    /// Parse an `"H S% L%"` string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] for malformed or out-of-range input.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        let invalid = |reason: &'static str| ConfigError::InvalidColor {
            value: raw.to_string(),
            reason,
        };
        let pattern = HSL_PATTERN
            .as_ref()
            .ok_or_else(|| invalid("color pattern unavailable"))?;
        let captures = pattern
            .captures(raw)
            .ok_or_else(|| invalid("expected \"H S% L%\""))?;
        let component = |index: usize| -> ConfigResult<f64> {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .ok_or_else(|| invalid("component is not a number"))
        };
        let hsl = Self {
            hue: component(1)?,
            saturation: component(2)?,
            lightness: component(3)?,
        };
        if hsl.hue > 360.0 {
            return Err(invalid("hue must be between 0 and 360"));
        }
        if hsl.saturation > 100.0 || hsl.lightness > 100.0 {
            return Err(invalid("saturation and lightness must be between 0% and 100%"));
        }
        Ok(hsl)
    }

    /// Convert to sRGB channels in `0.0..=1.0`.
    #[must_use]
    pub fn to_rgb(self) -> [f64; 3] {
        let hue = self.hue.rem_euclid(360.0);
        let saturation = self.saturation / 100.0;
        let lightness = self.lightness / 100.0;

        let chroma = (1.0 - 2.0f64.mul_add(lightness, -1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let secondary = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let offset = lightness - chroma / 2.0;

        let (r, g, b) = if sector < 1.0 {
            (chroma, secondary, 0.0)
        } else if sector < 2.0 {
            (secondary, chroma, 0.0)
        } else if sector < 3.0 {
            (0.0, chroma, secondary)
        } else if sector < 4.0 {
            (0.0, secondary, chroma)
        } else if sector < 5.0 {
            (secondary, 0.0, chroma)
        } else {
            (chroma, 0.0, secondary)
        };
        [r + offset, g + offset, b + offset]
    }

    /// WCAG relative luminance using the sRGB linearisation curve.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        fn linearise(channel: f64) -> f64 {
            if channel <= 0.040_45 {
                channel / 12.92
            } else {
                ((channel + 0.055) / 1.055).powf(2.4)
            }
        }
        let [r, g, b] = self.to_rgb();
        0.0722f64.mul_add(
            linearise(b),
            0.2126f64.mul_add(linearise(r), 0.7152 * linearise(g)),
        )
    }

    /// Same hue and saturation with lightness shifted by `delta` points, clamped.
    #[must_use]
    pub fn with_lightness_delta(self, delta: f64) -> Self {
        Self {
            lightness: (self.lightness + delta).clamp(0.0, 100.0),
            ..self
        }
    }
}

impl Display for Hsl {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {}% {}%",
            trim_float(self.hue),
            trim_float(self.saturation),
            trim_float(self.lightness)
        )
    }
}

fn trim_float(value: f64) -> String {
    let rendered = format!("{value:.1}");
    rendered
        .strip_suffix(".0")
        .map_or(rendered.clone(), str::to_string)
}
