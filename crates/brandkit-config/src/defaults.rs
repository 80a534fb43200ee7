//! Default factory for Brand DNA configurations.
//!
//! # Design
//! - Deterministic: timestamps are pinned to the Unix epoch; the store stamps
//!   real instants when it adopts or mutates a configuration.
//! - Every closed set is filled through an exhaustive `match`, so adding a token
//!   without a default fails to compile.

use brandkit_fonts::catalog::{INTER, JETBRAINS_MONO, MERRIWEATHER};
use brandkit_fonts::to_font_family;
use chrono::{DateTime, Utc};

use crate::color::ColorValue;
use crate::model::{
    Assets, BrandColors, BrandConfiguration, Metadata, Spacing, ThemeColors, Typography,
};
use crate::tokens::{
    ColorRole, LetterSpacingPreset, LineHeightPreset, RadiusToken, ScaleToken, SpacingToken,
    ThemeVariant, TokenSet,
};

/// Name given to a freshly created brand.
pub const DEFAULT_BRAND_NAME: &str = "Untitled Brand";

/// Default chart palette (five series).
pub const DEFAULT_CHART: [&str; 5] = [
    "12 76% 61%",
    "173 58% 39%",
    "197 37% 24%",
    "43 74% 66%",
    "27 87% 67%",
];

/// Produce a complete, valid configuration with neutral blue-based values.
#[must_use]
pub fn default_brand_configuration() -> BrandConfiguration {
    let epoch = DateTime::<Utc>::default();
    BrandConfiguration {
        colors: BrandColors {
            light: default_theme(ThemeVariant::Light),
            dark: default_theme(ThemeVariant::Dark),
            chart: DEFAULT_CHART.iter().copied().map(ColorValue::from).collect(),
        },
        typography: default_typography(),
        spacing: default_spacing(),
        assets: Assets::default(),
        metadata: Metadata {
            name: DEFAULT_BRAND_NAME.to_string(),
            tagline: String::new(),
            created_at: epoch,
            updated_at: epoch,
        },
        strategy: None,
    }
}

/// Default role assignments for `variant`.
#[must_use]
pub fn default_theme(variant: ThemeVariant) -> ThemeColors {
    ColorRole::ALL
        .iter()
        .map(|role| {
            let value = match variant {
                ThemeVariant::Light => light_color(*role),
                ThemeVariant::Dark => dark_color(*role),
            };
            (*role, ColorValue::from(value))
        })
        .collect()
}

/// Default typography: Inter headings, Merriweather body, `JetBrains Mono` code.
#[must_use]
pub fn default_typography() -> Typography {
    Typography {
        heading: to_font_family(&INTER),
        body: to_font_family(&MERRIWEATHER),
        mono: to_font_family(&JETBRAINS_MONO),
        scale: ScaleToken::ALL
            .iter()
            .map(|token| (*token, scale_length(*token).to_string()))
            .collect(),
        line_height: LineHeightPreset::ALL
            .iter()
            .map(|preset| (*preset, line_height(*preset)))
            .collect(),
        letter_spacing: LetterSpacingPreset::ALL
            .iter()
            .map(|preset| (*preset, letter_spacing(*preset).to_string()))
            .collect(),
    }
}

/// Default radius and spacing scales.
#[must_use]
pub fn default_spacing() -> Spacing {
    Spacing {
        radius: RadiusToken::ALL
            .iter()
            .map(|token| (*token, radius_length(*token).to_string()))
            .collect(),
        spacing: SpacingToken::ALL
            .iter()
            .map(|token| (*token, spacing_length(*token).to_string()))
            .collect(),
    }
}

const fn light_color(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Background | ColorRole::Card | ColorRole::Popover => "0 0% 100%",
        ColorRole::Foreground | ColorRole::CardForeground | ColorRole::PopoverForeground => {
            "222.2 84% 4.9%"
        }
        ColorRole::Primary | ColorRole::Ring => "221.2 83.2% 53.3%",
        ColorRole::PrimaryForeground | ColorRole::DestructiveForeground => "210 40% 98%",
        ColorRole::Secondary | ColorRole::Muted | ColorRole::Accent => "210 40% 96.1%",
        ColorRole::SecondaryForeground | ColorRole::AccentForeground => "222.2 47.4% 11.2%",
        ColorRole::MutedForeground => "215.4 16.3% 46.9%",
        ColorRole::Destructive => "0 84.2% 60.2%",
        ColorRole::Border | ColorRole::Input => "214.3 31.8% 91.4%",
    }
}

const fn dark_color(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Background | ColorRole::Card | ColorRole::Popover => "222.2 84% 4.9%",
        ColorRole::Foreground
        | ColorRole::CardForeground
        | ColorRole::PopoverForeground
        | ColorRole::SecondaryForeground
        | ColorRole::AccentForeground
        | ColorRole::DestructiveForeground => "210 40% 98%",
        ColorRole::Primary => "217.2 91.2% 59.8%",
        ColorRole::PrimaryForeground => "222.2 47.4% 11.2%",
        ColorRole::Secondary
        | ColorRole::Muted
        | ColorRole::Accent
        | ColorRole::Border
        | ColorRole::Input => "217.2 32.6% 17.5%",
        ColorRole::MutedForeground => "215 20.2% 65.1%",
        ColorRole::Destructive => "0 62.8% 30.6%",
        ColorRole::Ring => "224.3 76.3% 48%",
    }
}

const fn scale_length(token: ScaleToken) -> &'static str {
    match token {
        ScaleToken::Xs => "0.75rem",
        ScaleToken::Sm => "0.875rem",
        ScaleToken::Base => "1rem",
        ScaleToken::Lg => "1.125rem",
        ScaleToken::Xl => "1.25rem",
        ScaleToken::Xl2 => "1.5rem",
        ScaleToken::Xl3 => "1.875rem",
        ScaleToken::Xl4 => "2.25rem",
        ScaleToken::Xl5 => "3rem",
        ScaleToken::Xl6 => "3.75rem",
        ScaleToken::Xl7 => "4.5rem",
        ScaleToken::Xl8 => "6rem",
        ScaleToken::Xl9 => "8rem",
    }
}

const fn line_height(preset: LineHeightPreset) -> f64 {
    match preset {
        LineHeightPreset::Tight => 1.25,
        LineHeightPreset::Normal => 1.5,
        LineHeightPreset::Relaxed => 1.75,
    }
}

const fn letter_spacing(preset: LetterSpacingPreset) -> &'static str {
    match preset {
        LetterSpacingPreset::Tight => "-0.025em",
        LetterSpacingPreset::Normal => "0em",
        LetterSpacingPreset::Wide => "0.025em",
    }
}

const fn radius_length(token: RadiusToken) -> &'static str {
    match token {
        RadiusToken::Sm => "0.125rem",
        RadiusToken::Md => "0.375rem",
        RadiusToken::Lg => "0.5rem",
        RadiusToken::Xl => "0.75rem",
        RadiusToken::Xl2 => "1rem",
        RadiusToken::Full => "9999px",
    }
}

const fn spacing_length(token: SpacingToken) -> &'static str {
    match token {
        SpacingToken::Xs => "0.25rem",
        SpacingToken::Sm => "0.5rem",
        SpacingToken::Md => "1rem",
        SpacingToken::Lg => "1.5rem",
        SpacingToken::Xl => "2rem",
        SpacingToken::Xl2 => "3rem",
        SpacingToken::Xl3 => "4rem",
        SpacingToken::Xl4 => "6rem",
    }
}
