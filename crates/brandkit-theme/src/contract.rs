//! Brand configuration to named style variables.
//!
//! # Design
//! - Variable names derive from the closed token sets; no role is spelled as a
//!   literal here.
//! - Colors are emitted as raw `H S% L%` triples so consumers compose them with
//!   `hsl(var(--brand-primary))` and alpha modifiers.
//! - Every selector in the rendered stylesheet is nested under the preview scope.

use std::fmt::Write as _;

use brandkit_config::{
    BrandConfiguration, ColorRole, FontRole, LetterSpacingPreset, LineHeightPreset, RadiusToken,
    ScaleToken, SpacingToken, ThemeVariant, TokenSet,
};
use serde::Serialize;

use crate::container::StyleLayer;
use crate::scope::PreviewScope;

/// Prefix shared by every rendered variable.
pub const VARIABLE_PREFIX: &str = "--brand-";

/// Role grouping of style variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableGroup {
    /// Light theme colors.
    ColorLight,
    /// Dark theme colors.
    ColorDark,
    /// Chart palette.
    Chart,
    /// Font stacks, type scale, line heights, letter spacing.
    Typography,
    /// Spacing scale.
    Spacing,
    /// Corner radii.
    Radius,
}

impl VariableGroup {
    /// Groups in render order.
    pub const ALL: [Self; 6] = [
        Self::ColorLight,
        Self::ColorDark,
        Self::Chart,
        Self::Typography,
        Self::Spacing,
        Self::Radius,
    ];

    /// Wire spelling of the group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorLight => "color-light",
            Self::ColorDark => "color-dark",
            Self::Chart => "chart",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::Radius => "radius",
        }
    }

    /// Layer the group's variables are written to.
    #[must_use]
    pub const fn layer(self) -> StyleLayer {
        match self {
            Self::ColorDark => StyleLayer::Dark,
            _ => StyleLayer::Base,
        }
    }
}

/// One custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleVariable {
    /// Property name including the `--brand-` prefix.
    pub name: String,
    /// Property value.
    pub value: String,
}

impl StyleVariable {
    fn new(suffix: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            name: format!("{VARIABLE_PREFIX}{}", suffix.as_ref()),
            value: value.into(),
        }
    }
}

/// Variables belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleGroup {
    /// Group identifier.
    pub group: VariableGroup,
    /// Variables in token order.
    pub variables: Vec<StyleVariable>,
}

/// Complete set of scoped variables for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleContract {
    /// Preview container the variables are bound to.
    pub scope: PreviewScope,
    /// Groups in render order.
    pub groups: Vec<StyleGroup>,
}

impl StyleContract {
    /// Variables of `group`, if rendered.
    #[must_use]
    pub fn group(&self, group: VariableGroup) -> Option<&StyleGroup> {
        self.groups.iter().find(|candidate| candidate.group == group)
    }

    /// Every variable paired with the layer it belongs to.
    pub fn variables(&self) -> impl Iterator<Item = (StyleLayer, &StyleVariable)> {
        self.groups.iter().flat_map(|group| {
            let layer = group.group.layer();
            group.variables.iter().map(move |variable| (layer, variable))
        })
    }

    /// Value of `name` in `layer`.
    #[must_use]
    pub fn get(&self, layer: StyleLayer, name: &str) -> Option<&str> {
        self.variables()
            .find(|(candidate_layer, variable)| *candidate_layer == layer && variable.name == name)
            .map(|(_, variable)| variable.value.as_str())
    }

    /// Total number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.variables.len()).sum()
    }

    /// Whether no variables were rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a stylesheet scoped to the preview container.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (layer, selector) in [
            (StyleLayer::Base, self.scope.selector()),
            (StyleLayer::Dark, self.scope.dark_selector()),
        ] {
            let mut block = self
                .variables()
                .filter(|(candidate, variable)| {
                    *candidate == layer && !breaks_declaration(&variable.value)
                })
                .peekable();
            if block.peek().is_none() {
                continue;
            }
            if !css.is_empty() {
                css.push('\n');
            }
            let _ = writeln!(css, "{selector} {{");
            for (_, variable) in block {
                let _ = writeln!(css, "  {}: {};", variable.name, variable.value);
            }
            css.push_str("}\n");
        }
        css
    }
}

/// Whether `value` would end its declaration or the enclosing rule when
/// written after `name:`.
pub(crate) fn breaks_declaration(value: &str) -> bool {
    value.contains([';', '{', '}', '\\', '<', '\n', '\r'])
        || value.contains("/*")
        || value.contains("*/")
        || value.matches('"').count() % 2 == 1
}

/// Build the style contract for `config` inside `scope`.
///
/// Entries missing from the configuration are skipped; callers are expected
/// to validate first.
#[must_use]
pub fn render_contract(config: &BrandConfiguration, scope: &PreviewScope) -> StyleContract {
    let groups = VariableGroup::ALL
        .iter()
        .map(|group| StyleGroup {
            group: *group,
            variables: group_variables(config, *group),
        })
        .filter(|group| !group.variables.is_empty())
        .collect();
    StyleContract {
        scope: scope.clone(),
        groups,
    }
}

fn group_variables(config: &BrandConfiguration, group: VariableGroup) -> Vec<StyleVariable> {
    match group {
        VariableGroup::ColorLight => color_variables(config, ThemeVariant::Light),
        VariableGroup::ColorDark => color_variables(config, ThemeVariant::Dark),
        VariableGroup::Chart => config
            .colors
            .chart
            .iter()
            .enumerate()
            .map(|(index, color)| StyleVariable::new(format!("chart-{}", index + 1), color.as_str()))
            .collect(),
        VariableGroup::Typography => typography_variables(config),
        VariableGroup::Spacing => token_variables::<SpacingToken>("space", &config.spacing.spacing),
        VariableGroup::Radius => token_variables::<RadiusToken>("radius", &config.spacing.radius),
    }
}

fn color_variables(config: &BrandConfiguration, variant: ThemeVariant) -> Vec<StyleVariable> {
    let theme = config.colors.theme(variant);
    ColorRole::ALL
        .iter()
        .filter_map(|role| {
            theme
                .get(role)
                .map(|color| StyleVariable::new(role.as_str(), color.as_str()))
        })
        .collect()
}

fn typography_variables(config: &BrandConfiguration) -> Vec<StyleVariable> {
    let typography = &config.typography;
    let mut variables = FontRole::ALL
        .iter()
        .map(|role| {
            StyleVariable::new(
                format!("font-{}", role.as_str()),
                typography.font(*role).css_stack(),
            )
        })
        .collect::<Vec<_>>();
    variables.extend(token_variables::<ScaleToken>("text", &typography.scale));
    variables.extend(LineHeightPreset::ALL.iter().filter_map(|preset| {
        typography
            .line_height
            .get(preset)
            .map(|value| StyleVariable::new(format!("leading-{}", preset.as_str()), value.to_string()))
    }));
    variables.extend(token_variables::<LetterSpacingPreset>(
        "tracking",
        &typography.letter_spacing,
    ));
    variables
}

fn token_variables<T: TokenSet>(
    prefix: &str,
    values: &std::collections::BTreeMap<T, String>,
) -> Vec<StyleVariable> {
    T::ALL
        .iter()
        .filter_map(|token| {
            values
                .get(token)
                .map(|value| StyleVariable::new(format!("{prefix}-{}", token.as_str()), value.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_config::default_brand_configuration;

    fn default_contract() -> StyleContract {
        render_contract(&default_brand_configuration(), &PreviewScope::default())
    }

    #[test]
    fn every_token_has_a_variable() {
        let contract = default_contract();
        let count = |group| contract.group(group).map_or(0, |group| group.variables.len());
        assert_eq!(count(VariableGroup::ColorLight), ColorRole::ALL.len());
        assert_eq!(count(VariableGroup::ColorDark), ColorRole::ALL.len());
        assert_eq!(count(VariableGroup::Chart), 5);
        assert_eq!(
            count(VariableGroup::Typography),
            FontRole::ALL.len()
                + ScaleToken::ALL.len()
                + LineHeightPreset::ALL.len()
                + LetterSpacingPreset::ALL.len()
        );
        assert_eq!(count(VariableGroup::Spacing), SpacingToken::ALL.len());
        assert_eq!(count(VariableGroup::Radius), RadiusToken::ALL.len());
    }

    #[test]
    fn variables_use_token_spelling() {
        let contract = default_contract();
        assert_eq!(
            contract.get(StyleLayer::Base, "--brand-primary-foreground"),
            Some("210 40% 98%")
        );
        assert_eq!(
            contract.get(StyleLayer::Dark, "--brand-primary"),
            Some("217.2 91.2% 59.8%")
        );
        assert_eq!(contract.get(StyleLayer::Base, "--brand-text-2xl"), Some("1.5rem"));
        assert_eq!(contract.get(StyleLayer::Base, "--brand-leading-normal"), Some("1.5"));
        assert_eq!(contract.get(StyleLayer::Base, "--brand-chart-1"), Some("12 76% 61%"));
        assert!(
            contract
                .get(StyleLayer::Base, "--brand-font-heading")
                .is_some_and(|stack| stack.starts_with("\"Inter\""))
        );
    }

    #[test]
    fn css_never_targets_a_global_root() {
        let css = default_contract().to_css();
        assert!(!css.contains(":root"));
        assert!(!css.contains("html"));
        let selectors = css
            .lines()
            .filter(|line| line.ends_with('{'))
            .collect::<Vec<_>>();
        assert_eq!(
            selectors,
            vec![
                "[data-brand-preview=\"brand-preview\"] {",
                "[data-brand-preview=\"brand-preview\"][data-theme=\"dark\"] {",
            ]
        );
    }

    #[test]
    fn missing_entries_are_skipped() {
        let mut config = default_brand_configuration();
        config.colors.dark.clear();
        let contract = render_contract(&config, &PreviewScope::default());
        assert!(contract.group(VariableGroup::ColorDark).is_none());
        assert!(!contract.to_css().contains("data-theme"));
    }

    #[test]
    fn values_that_break_out_of_the_rule_are_not_written() {
        let mut config = default_brand_configuration();
        config.typography.scale.insert(
            ScaleToken::Xs,
            "1rem } :root { --brand-primary: 0 100% 50%".into(),
        );
        config
            .typography
            .letter_spacing
            .insert(LetterSpacingPreset::Tight, "-0.025em\n}".into());
        let css = render_contract(&config, &PreviewScope::default()).to_css();
        assert!(!css.contains(":root"));
        assert!(!css.contains("--brand-text-xs"));
        assert!(!css.contains("--brand-tracking-tight"));
        assert!(css.contains("--brand-text-sm: "));
        assert_eq!(css.matches('{').count(), css.matches('}').count());
    }
}
