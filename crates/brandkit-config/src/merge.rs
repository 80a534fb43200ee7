//! Pure partial-update functions: `(old, patch) -> new`.
//!
//! # Design
//! - Inputs are never mutated; each call returns a fresh configuration so
//!   readers holding the previous snapshot are unaffected.
//! - Nested maps merge key by key through one helper instead of hand-written
//!   spreads per field.
//! - Timestamps are stamped separately (`stamp_updated`) by the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::defaults::default_typography;
use crate::model::{
    AssetsPatch, BrandConfiguration, BrandValue, BrandValuePatch, ColorsPatch, MetadataPatch,
    SpacingPatch, Strategy, StrategyPatch, TypographyPatch,
};

/// Overlay `patch` onto `base`, key by key.
#[must_use]
pub fn merge_map<K: Ord + Clone, V: Clone>(
    base: &BTreeMap<K, V>,
    patch: Option<&BTreeMap<K, V>>,
) -> BTreeMap<K, V> {
    let mut merged = base.clone();
    if let Some(patch) = patch {
        merged.extend(patch.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

/// Merge a colors patch; theme maps merge per role, the chart palette is replaced.
#[must_use]
pub fn apply_colors(config: &BrandConfiguration, patch: &ColorsPatch) -> BrandConfiguration {
    let mut next = config.clone();
    next.colors.light = merge_map(&config.colors.light, patch.light.as_ref());
    next.colors.dark = merge_map(&config.colors.dark, patch.dark.as_ref());
    if let Some(chart) = &patch.chart {
        next.colors.chart.clone_from(chart);
    }
    next
}

/// Merge a typography patch.
///
/// When a scale map is patched, keys absent from both the current configuration
/// and the patch are filled from the default factory.
#[must_use]
pub fn apply_typography(config: &BrandConfiguration, patch: &TypographyPatch) -> BrandConfiguration {
    let mut next = config.clone();
    let current = &config.typography;
    let typography = &mut next.typography;
    if let Some(heading) = &patch.heading {
        typography.heading = heading.clone();
    }
    if let Some(body) = &patch.body {
        typography.body = body.clone();
    }
    if let Some(mono) = &patch.mono {
        typography.mono = mono.clone();
    }

    if patch.scale.is_some() || patch.line_height.is_some() || patch.letter_spacing.is_some() {
        let defaults = default_typography();
        if let Some(scale) = &patch.scale {
            typography.scale = merge_map(&merge_map(&defaults.scale, Some(&current.scale)), Some(scale));
        }
        if let Some(line_height) = &patch.line_height {
            typography.line_height = merge_map(
                &merge_map(&defaults.line_height, Some(&current.line_height)),
                Some(line_height),
            );
        }
        if let Some(letter_spacing) = &patch.letter_spacing {
            typography.letter_spacing = merge_map(
                &merge_map(&defaults.letter_spacing, Some(&current.letter_spacing)),
                Some(letter_spacing),
            );
        }
    }
    next
}

/// Merge a spacing patch; both maps merge per token.
#[must_use]
pub fn apply_spacing(config: &BrandConfiguration, patch: &SpacingPatch) -> BrandConfiguration {
    let mut next = config.clone();
    next.spacing.radius = merge_map(&config.spacing.radius, patch.radius.as_ref());
    next.spacing.spacing = merge_map(&config.spacing.spacing, patch.spacing.as_ref());
    next
}

/// Shallow-merge an assets patch.
#[must_use]
pub fn apply_assets(config: &BrandConfiguration, patch: &AssetsPatch) -> BrandConfiguration {
    let mut next = config.clone();
    if let Some(logo) = &patch.logo {
        next.assets.logo = Some(logo.clone());
    }
    if let Some(favicon) = &patch.favicon {
        next.assets.favicon = Some(favicon.clone());
    }
    if let Some(images) = &patch.images {
        next.assets.images.clone_from(images);
    }
    next
}

/// Shallow-merge a metadata patch.
#[must_use]
pub fn apply_metadata(config: &BrandConfiguration, patch: &MetadataPatch) -> BrandConfiguration {
    let mut next = config.clone();
    if let Some(name) = &patch.name {
        next.metadata.name.clone_from(name);
    }
    if let Some(tagline) = &patch.tagline {
        next.metadata.tagline.clone_from(tagline);
    }
    next
}

/// Shallow-merge a strategy patch, creating the strategy block if absent.
#[must_use]
pub fn apply_strategy(config: &BrandConfiguration, patch: &StrategyPatch) -> BrandConfiguration {
    let mut next = config.clone();
    let strategy = next.strategy.get_or_insert_with(Strategy::default);
    if let Some(values) = &patch.values {
        strategy.values.clone_from(values);
    }
    if let Some(tone) = &patch.tone_of_voice {
        strategy.tone_of_voice = tone.clone();
    }
    if let Some(mission) = &patch.mission {
        strategy.mission = Some(mission.clone());
    }
    if let Some(audience) = &patch.audience {
        strategy.audience = Some(audience.clone());
    }
    next
}

/// Append a brand value. Returns `None` when the id is already present.
#[must_use]
pub fn add_value(config: &BrandConfiguration, value: BrandValue) -> Option<BrandConfiguration> {
    if find_value(config, &value.id).is_some() {
        return None;
    }
    let mut next = config.clone();
    next.strategy
        .get_or_insert_with(Strategy::default)
        .values
        .push(value);
    Some(next)
}

/// Remove the value with `id`. Returns `None` when no such value exists.
#[must_use]
pub fn remove_value(config: &BrandConfiguration, id: &str) -> Option<BrandConfiguration> {
    let index = find_value(config, id)?;
    let mut next = config.clone();
    if let Some(strategy) = next.strategy.as_mut() {
        strategy.values.remove(index);
    }
    Some(next)
}

/// Patch the value with `id`. Returns `None` when no such value exists.
#[must_use]
pub fn update_value(
    config: &BrandConfiguration,
    id: &str,
    patch: &BrandValuePatch,
) -> Option<BrandConfiguration> {
    let index = find_value(config, id)?;
    let mut next = config.clone();
    let value = next.strategy.as_mut()?.values.get_mut(index)?;
    if let Some(label) = &patch.label {
        value.label.clone_from(label);
    }
    if let Some(description) = &patch.description {
        value.description.clone_from(description);
    }
    Some(next)
}

/// Stamp `updatedAt`, never moving it backwards.
#[must_use]
pub fn stamp_updated(config: BrandConfiguration, now: DateTime<Utc>) -> BrandConfiguration {
    let mut next = config;
    next.metadata.updated_at = next.metadata.updated_at.max(now);
    next
}

fn find_value(config: &BrandConfiguration, id: &str) -> Option<usize> {
    config
        .strategy
        .as_ref()?
        .values
        .iter()
        .position(|value| value.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorValue;
    use crate::defaults::default_brand_configuration;
    use crate::tokens::{ColorRole, RadiusToken, ScaleToken, ThemeVariant, TokenSet};
    use chrono::Duration;

    #[test]
    fn color_patch_touches_only_the_named_role() {
        let before = default_brand_configuration();
        let patch = ColorsPatch {
            light: Some(BTreeMap::from([(
                ColorRole::Primary,
                ColorValue::from("340 82% 52%"),
            )])),
            ..ColorsPatch::default()
        };
        let after = apply_colors(&before, &patch);

        for variant in ThemeVariant::ALL {
            for role in ColorRole::ALL {
                let changed = *variant == ThemeVariant::Light && *role == ColorRole::Primary;
                let old = before.colors.theme(*variant).get(role);
                let new = after.colors.theme(*variant).get(role);
                if changed {
                    assert_eq!(new.map(ColorValue::as_str), Some("340 82% 52%"));
                } else {
                    assert_eq!(old, new, "{variant}.{role} changed");
                }
            }
        }
        assert_eq!(before.colors.chart, after.colors.chart);
    }

    #[test]
    fn scale_patch_fills_gaps_from_defaults() {
        let mut config = default_brand_configuration();
        config.typography.scale.remove(&ScaleToken::Xl9);
        let patch = TypographyPatch {
            scale: Some(BTreeMap::from([(ScaleToken::Base, "1.0625rem".to_string())])),
            ..TypographyPatch::default()
        };
        let next = apply_typography(&config, &patch);
        assert_eq!(next.typography.scale.len(), ScaleToken::ALL.len());
        assert_eq!(
            next.typography.scale.get(&ScaleToken::Base).map(String::as_str),
            Some("1.0625rem")
        );
        assert_eq!(config.typography.scale.len(), ScaleToken::ALL.len() - 1);
    }

    #[test]
    fn spacing_patch_merges_single_token() {
        let config = default_brand_configuration();
        let patch = SpacingPatch {
            radius: Some(BTreeMap::from([(RadiusToken::Lg, "0.75rem".to_string())])),
            spacing: None,
        };
        let next = apply_spacing(&config, &patch);
        assert_eq!(next.spacing.radius.len(), config.spacing.radius.len());
        assert_eq!(
            next.spacing.radius.get(&RadiusToken::Lg).map(String::as_str),
            Some("0.75rem")
        );
        assert_eq!(next.spacing.spacing, config.spacing.spacing);
    }

    #[test]
    fn value_list_operations() {
        let config = default_brand_configuration();
        let value = BrandValue {
            id: "v1".into(),
            label: "Clarity".into(),
            description: "Say less, mean more.".into(),
        };
        let added = add_value(&config, value.clone()).expect("added");
        assert!(add_value(&added, value).is_none());

        let patched = update_value(
            &added,
            "v1",
            &BrandValuePatch {
                label: Some("Candor".into()),
                description: None,
            },
        )
        .expect("updated");
        let strategy = patched.strategy.as_ref().expect("strategy");
        assert_eq!(strategy.values[0].label, "Candor");
        assert_eq!(strategy.values[0].description, "Say less, mean more.");

        assert!(remove_value(&patched, "missing").is_none());
        let removed = remove_value(&patched, "v1").expect("removed");
        assert!(removed.strategy.expect("strategy").values.is_empty());
    }

    #[test]
    fn stamp_never_moves_backwards() {
        let config = default_brand_configuration();
        let later = config.metadata.updated_at + Duration::days(2);
        let stamped = stamp_updated(config, later);
        let restamped = stamp_updated(stamped.clone(), later - Duration::days(1));
        assert_eq!(restamped.metadata.updated_at, later);
    }
}
