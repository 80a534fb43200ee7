//! Curated font catalog with lookup, search, and pairing suggestions.
//!
//! # Design
//! - The catalog is a static table; nothing here touches brand state.
//! - Stylesheet URLs are derived from the entry so weights and URL never drift.
//! - Pairings are suggestions only; no automatic pairing logic is applied.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FontError;
use crate::family::{FontFamily, FontStyle};

const STYLESHEET_BASE: &str = "https://fonts.googleapis.com/css2";

const SANS_FALLBACK: &[&str] = &["ui-sans-serif", "system-ui", "sans-serif"];
const SERIF_FALLBACK: &[&str] = &["ui-serif", "Georgia", "serif"];
const DISPLAY_FALLBACK: &[&str] = &["system-ui", "sans-serif"];
const HANDWRITING_FALLBACK: &[&str] = &["cursive"];
const MONO_FALLBACK: &[&str] = &["ui-monospace", "SFMono-Regular", "Menlo", "monospace"];

const ALL_WEIGHTS: &[u16] = &[100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Broad classification used by font pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    /// Sans-serif text faces.
    SansSerif,
    /// Serif text faces.
    Serif,
    /// Display and headline faces.
    Display,
    /// Script and handwriting faces.
    Handwriting,
    /// Fixed-width faces.
    Monospace,
}

impl FontCategory {
    /// All categories in picker order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::SansSerif,
            Self::Serif,
            Self::Display,
            Self::Handwriting,
            Self::Monospace,
        ]
    }

    /// Stable string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Display => "display",
            Self::Handwriting => "handwriting",
            Self::Monospace => "monospace",
        }
    }
}

impl FromStr for FontCategory {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FontError::UnknownCategory {
                value: s.to_string(),
            })
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    /// Family name as published by the provider.
    pub name: &'static str,
    /// Picker category.
    pub category: FontCategory,
    /// Weights the provider serves for this family, ascending.
    pub weights: &'static [u16],
    /// Number of weight/style variants the provider serves.
    pub variants: u8,
    /// Generic fallback chain.
    pub fallback: &'static [&'static str],
}

impl FontDescriptor {
    /// Whether the provider serves italic variants for the family.
    #[must_use]
    pub const fn has_italic(&self) -> bool {
        self.variants as usize > self.weights.len()
    }

    /// Whether `weight` is one of the advertised weights.
    #[must_use]
    pub fn supports_weight(&self, weight: u16) -> bool {
        self.weights.contains(&weight)
    }
}

/// Heading/body suggestion shown next to the font pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontPairing {
    /// Heading family name.
    pub heading: &'static str,
    /// Body family name.
    pub body: &'static str,
    /// Short rationale displayed to the user.
    pub description: &'static str,
}

/// Default heading face.
pub const INTER: FontDescriptor = FontDescriptor {
    name: "Inter",
    category: FontCategory::SansSerif,
    weights: ALL_WEIGHTS,
    variants: 18,
    fallback: SANS_FALLBACK,
};

/// Default body face.
pub const MERRIWEATHER: FontDescriptor = FontDescriptor {
    name: "Merriweather",
    category: FontCategory::Serif,
    weights: &[300, 400, 700, 900],
    variants: 8,
    fallback: SERIF_FALLBACK,
};

/// Default monospace face.
pub const JETBRAINS_MONO: FontDescriptor = FontDescriptor {
    name: "JetBrains Mono",
    category: FontCategory::Monospace,
    weights: &[100, 200, 300, 400, 500, 600, 700, 800],
    variants: 16,
    fallback: MONO_FALLBACK,
};

const CATALOG: &[FontDescriptor] = &[
    INTER,
    FontDescriptor {
        name: "Roboto",
        category: FontCategory::SansSerif,
        weights: &[100, 300, 400, 500, 700, 900],
        variants: 12,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Open Sans",
        category: FontCategory::SansSerif,
        weights: &[300, 400, 500, 600, 700, 800],
        variants: 12,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Lato",
        category: FontCategory::SansSerif,
        weights: &[100, 300, 400, 700, 900],
        variants: 10,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Montserrat",
        category: FontCategory::SansSerif,
        weights: ALL_WEIGHTS,
        variants: 18,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Poppins",
        category: FontCategory::SansSerif,
        weights: ALL_WEIGHTS,
        variants: 18,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Source Sans 3",
        category: FontCategory::SansSerif,
        weights: &[200, 300, 400, 500, 600, 700, 800, 900],
        variants: 16,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Work Sans",
        category: FontCategory::SansSerif,
        weights: ALL_WEIGHTS,
        variants: 18,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "DM Sans",
        category: FontCategory::SansSerif,
        weights: &[400, 500, 700],
        variants: 6,
        fallback: SANS_FALLBACK,
    },
    FontDescriptor {
        name: "Playfair Display",
        category: FontCategory::Serif,
        weights: &[400, 500, 600, 700, 800, 900],
        variants: 12,
        fallback: SERIF_FALLBACK,
    },
    MERRIWEATHER,
    FontDescriptor {
        name: "Lora",
        category: FontCategory::Serif,
        weights: &[400, 500, 600, 700],
        variants: 8,
        fallback: SERIF_FALLBACK,
    },
    FontDescriptor {
        name: "Libre Baskerville",
        category: FontCategory::Serif,
        weights: &[400, 700],
        variants: 3,
        fallback: SERIF_FALLBACK,
    },
    FontDescriptor {
        name: "Source Serif 4",
        category: FontCategory::Serif,
        weights: &[200, 300, 400, 500, 600, 700, 800, 900],
        variants: 16,
        fallback: SERIF_FALLBACK,
    },
    FontDescriptor {
        name: "EB Garamond",
        category: FontCategory::Serif,
        weights: &[400, 500, 600, 700, 800],
        variants: 10,
        fallback: SERIF_FALLBACK,
    },
    FontDescriptor {
        name: "Oswald",
        category: FontCategory::Display,
        weights: &[200, 300, 400, 500, 600, 700],
        variants: 6,
        fallback: DISPLAY_FALLBACK,
    },
    FontDescriptor {
        name: "Bebas Neue",
        category: FontCategory::Display,
        weights: &[400],
        variants: 1,
        fallback: DISPLAY_FALLBACK,
    },
    FontDescriptor {
        name: "Abril Fatface",
        category: FontCategory::Display,
        weights: &[400],
        variants: 1,
        fallback: DISPLAY_FALLBACK,
    },
    FontDescriptor {
        name: "Caveat",
        category: FontCategory::Handwriting,
        weights: &[400, 500, 600, 700],
        variants: 4,
        fallback: HANDWRITING_FALLBACK,
    },
    FontDescriptor {
        name: "Dancing Script",
        category: FontCategory::Handwriting,
        weights: &[400, 500, 600, 700],
        variants: 4,
        fallback: HANDWRITING_FALLBACK,
    },
    JETBRAINS_MONO,
    FontDescriptor {
        name: "Fira Code",
        category: FontCategory::Monospace,
        weights: &[300, 400, 500, 600, 700],
        variants: 5,
        fallback: MONO_FALLBACK,
    },
    FontDescriptor {
        name: "Source Code Pro",
        category: FontCategory::Monospace,
        weights: &[200, 300, 400, 500, 600, 700, 800, 900],
        variants: 16,
        fallback: MONO_FALLBACK,
    },
    FontDescriptor {
        name: "IBM Plex Mono",
        category: FontCategory::Monospace,
        weights: &[100, 200, 300, 400, 500, 600, 700],
        variants: 14,
        fallback: MONO_FALLBACK,
    },
];

const PAIRINGS: &[FontPairing] = &[
    FontPairing {
        heading: "Playfair Display",
        body: "Source Sans 3",
        description: "High-contrast editorial serif over a neutral humanist sans.",
    },
    FontPairing {
        heading: "Montserrat",
        body: "Merriweather",
        description: "Geometric headlines over a sturdy reading serif.",
    },
    FontPairing {
        heading: "Inter",
        body: "Inter",
        description: "Single-family system suited to dense product interfaces.",
    },
    FontPairing {
        heading: "Oswald",
        body: "Open Sans",
        description: "Condensed display caps with a friendly, legible body.",
    },
    FontPairing {
        heading: "Lora",
        body: "Lato",
        description: "Calligraphic serif headings softened by a rounded sans.",
    },
    FontPairing {
        heading: "Bebas Neue",
        body: "Montserrat",
        description: "Poster-style headlines for bold, campaign-driven brands.",
    },
    FontPairing {
        heading: "Poppins",
        body: "Lora",
        description: "Modern geometric headings paired with a warm serif body.",
    },
];

/// The full catalog in picker order.
#[must_use]
pub const fn catalog() -> &'static [FontDescriptor] {
    CATALOG
}

/// Catalog entries belonging to `category`.
#[must_use]
pub fn fonts_by_category(category: FontCategory) -> Vec<&'static FontDescriptor> {
    CATALOG
        .iter()
        .filter(|font| font.category == category)
        .collect()
}

/// Case-insensitive substring search over family names.
#[must_use]
pub fn search_fonts(query: &str) -> Vec<&'static FontDescriptor> {
    let needle = query.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|font| font.name.to_lowercase().contains(&needle))
        .collect()
}

/// Look up a family by name, ignoring ASCII case.
#[must_use]
pub fn find_font(name: &str) -> Option<&'static FontDescriptor> {
    CATALOG
        .iter()
        .find(|font| font.name.eq_ignore_ascii_case(name.trim()))
}

/// Static heading/body suggestions.
#[must_use]
pub const fn pairings() -> &'static [FontPairing] {
    PAIRINGS
}

/// Provider stylesheet URL covering every advertised weight (and italics when served).
#[must_use]
pub fn stylesheet_url(font: &FontDescriptor) -> String {
    let family = font.name.replace(' ', "+");
    let mut axis = String::new();
    if font.has_italic() {
        axis.push_str("ital,wght@");
        let mut first = true;
        for italic in [0_u8, 1] {
            for weight in font.weights {
                if !first {
                    axis.push(';');
                }
                first = false;
                let _ = write!(axis, "{italic},{weight}");
            }
        }
    } else {
        axis.push_str("wght@");
        let weights = font
            .weights
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(";");
        axis.push_str(&weights);
    }
    format!("{STYLESHEET_BASE}?family={family}:{axis}&display=swap")
}

/// Convert a catalog entry into a `FontFamily` selecting every advertised weight.
#[must_use]
pub fn to_font_family(font: &FontDescriptor) -> FontFamily {
    let mut styles = vec![FontStyle::Normal];
    if font.has_italic() {
        styles.push(FontStyle::Italic);
    }
    FontFamily {
        name: font.name.to_string(),
        weights: font.weights.to_vec(),
        styles,
        fallback: font.fallback.iter().map(|name| (*name).to_string()).collect(),
        url: Some(stylesheet_url(font)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique_and_weights_sorted() {
        let mut names = catalog().iter().map(|font| font.name).collect::<Vec<_>>();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        for font in catalog() {
            assert!(!font.weights.is_empty(), "{} has no weights", font.name);
            assert!(font.weights.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn every_category_has_entries() {
        for category in FontCategory::all() {
            assert!(
                !fonts_by_category(category).is_empty(),
                "{} is empty",
                category.as_str()
            );
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let hits = search_fonts("SANS");
        let names = hits.iter().map(|font| font.name).collect::<Vec<_>>();
        assert!(names.contains(&"Open Sans"));
        assert!(names.contains(&"Source Sans 3"));
        assert!(!names.contains(&"Inter"));
        assert_eq!(search_fonts("").len(), catalog().len());
    }

    #[test]
    fn find_font_matches_exact_name_only() {
        assert_eq!(find_font("inter").map(|font| font.name), Some("Inter"));
        assert!(find_font("Inte").is_none());
    }

    #[test]
    fn stylesheet_url_encodes_weights_and_italics() {
        let bebas = find_font("Bebas Neue").expect("catalog entry");
        assert_eq!(
            stylesheet_url(bebas),
            "https://fonts.googleapis.com/css2?family=Bebas+Neue:wght@400&display=swap"
        );

        let libre = find_font("Libre Baskerville").expect("catalog entry");
        assert_eq!(
            stylesheet_url(libre),
            "https://fonts.googleapis.com/css2?family=Libre+Baskerville:ital,wght@0,400;0,700;1,400;1,700&display=swap"
        );
    }

    #[test]
    fn to_font_family_selects_all_weights() {
        let family = to_font_family(&MERRIWEATHER);
        assert_eq!(family.weights, vec![300, 400, 700, 900]);
        assert_eq!(family.styles, vec![FontStyle::Normal, FontStyle::Italic]);
        assert_eq!(family.fallback.last().map(String::as_str), Some("serif"));
        assert!(family.url.is_some());
    }

    #[test]
    fn pairings_reference_catalog_fonts() {
        for pairing in pairings() {
            assert!(find_font(pairing.heading).is_some(), "{}", pairing.heading);
            assert!(find_font(pairing.body).is_some(), "{}", pairing.body);
        }
    }

    #[test]
    fn category_parses_from_label() {
        assert_eq!(
            "Monospace".parse::<FontCategory>().ok(),
            Some(FontCategory::Monospace)
        );
        assert!("gothic".parse::<FontCategory>().is_err());
    }
}
