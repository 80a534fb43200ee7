//! Closed token sets shared by the default factory, validator, and renderer.
//!
//! # Design
//! - Each set is an enum with an `ALL` table; consumers iterate `ALL` instead
//!   of spelling names, so the three components cannot drift apart.
//! - Serde goes through `as_str`/`FromStr` so the wire spelling lives in one place.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Behaviour shared by every closed token set.
pub trait TokenSet: Copy + Ord + FromStr<Err = UnknownToken> + 'static {
    /// Human-readable set name used in diagnostics.
    const SET: &'static str;
    /// Every member in canonical order.
    const ALL: &'static [Self];

    /// Wire spelling of the token.
    fn as_str(self) -> &'static str;
}

/// Token string did not belong to its set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {set} '{value}'")]
pub struct UnknownToken {
    /// Set the lookup ran against.
    pub set: &'static str,
    /// Offending value.
    pub value: String,
}

macro_rules! token_set {
    (
        $(#[$meta:meta])*
        $name:ident, $set:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Wire spelling of the token.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl TokenSet for $name {
            const SET: &'static str = $set;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownToken {
                        set: $set,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(D::Error::custom)
            }
        }
    };
}

token_set! {
    /// Semantic color roles resolved per theme variant.
    ColorRole, "color role" {
        Background => "background",
        Foreground => "foreground",
        Card => "card",
        CardForeground => "card-foreground",
        Popover => "popover",
        PopoverForeground => "popover-foreground",
        Primary => "primary",
        PrimaryForeground => "primary-foreground",
        Secondary => "secondary",
        SecondaryForeground => "secondary-foreground",
        Muted => "muted",
        MutedForeground => "muted-foreground",
        Accent => "accent",
        AccentForeground => "accent-foreground",
        Destructive => "destructive",
        DestructiveForeground => "destructive-foreground",
        Border => "border",
        Input => "input",
        Ring => "ring",
    }
}

token_set! {
    /// Type scale size tokens.
    ScaleToken, "scale token" {
        Xs => "xs",
        Sm => "sm",
        Base => "base",
        Lg => "lg",
        Xl => "xl",
        Xl2 => "2xl",
        Xl3 => "3xl",
        Xl4 => "4xl",
        Xl5 => "5xl",
        Xl6 => "6xl",
        Xl7 => "7xl",
        Xl8 => "8xl",
        Xl9 => "9xl",
    }
}

token_set! {
    /// Line height presets (unitless multipliers).
    LineHeightPreset, "line height preset" {
        Tight => "tight",
        Normal => "normal",
        Relaxed => "relaxed",
    }
}

token_set! {
    /// Letter spacing presets (CSS lengths).
    LetterSpacingPreset, "letter spacing preset" {
        Tight => "tight",
        Normal => "normal",
        Wide => "wide",
    }
}

token_set! {
    /// Corner radius presets.
    RadiusToken, "radius token" {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xl2 => "2xl",
        Full => "full",
    }
}

token_set! {
    /// Spacing scale presets.
    SpacingToken, "spacing token" {
        Xs => "xs",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
        Xl2 => "2xl",
        Xl3 => "3xl",
        Xl4 => "4xl",
    }
}

token_set! {
    /// Typography roles that each carry a font family.
    FontRole, "font role" {
        Heading => "heading",
        Body => "body",
        Mono => "mono",
    }
}

token_set! {
    /// Light or dark theme variant.
    ThemeVariant, "theme variant" {
        Light => "light",
        Dark => "dark",
    }
}

impl ColorRole {
    /// The `-foreground` partner drawn on top of this role, if any.
    #[must_use]
    pub const fn foreground_pair(self) -> Option<Self> {
        match self {
            Self::Background => Some(Self::Foreground),
            Self::Card => Some(Self::CardForeground),
            Self::Popover => Some(Self::PopoverForeground),
            Self::Primary => Some(Self::PrimaryForeground),
            Self::Secondary => Some(Self::SecondaryForeground),
            Self::Muted => Some(Self::MutedForeground),
            Self::Accent => Some(Self::AccentForeground),
            Self::Destructive => Some(Self::DestructiveForeground),
            _ => None,
        }
    }
}

/// Tokens of `T` absent from `keys`, in canonical order.
pub fn missing_tokens<T: TokenSet>(mut contains: impl FnMut(T) -> bool) -> Vec<T> {
    T::ALL
        .iter()
        .copied()
        .filter(|token| !contains(*token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trips<T: TokenSet + std::fmt::Debug>() {
        for token in T::ALL {
            assert_eq!(token.as_str().parse::<T>().ok(), Some(*token));
        }
    }

    #[test]
    fn every_set_round_trips_through_wire_spelling() {
        assert_round_trips::<ColorRole>();
        assert_round_trips::<ScaleToken>();
        assert_round_trips::<LineHeightPreset>();
        assert_round_trips::<LetterSpacingPreset>();
        assert_round_trips::<RadiusToken>();
        assert_round_trips::<SpacingToken>();
        assert_round_trips::<FontRole>();
        assert_round_trips::<ThemeVariant>();
    }

    #[test]
    fn closed_set_sizes() {
        assert_eq!(ColorRole::ALL.len(), 19);
        assert_eq!(ScaleToken::ALL.len(), 13);
        assert_eq!(RadiusToken::ALL.len(), 6);
        assert_eq!(SpacingToken::ALL.len(), 8);
        assert_eq!(ScaleToken::ALL.last().map(|t| t.as_str()), Some("9xl"));
    }

    #[test]
    fn unknown_token_reports_set() {
        let err = "tertiary".parse::<ColorRole>().expect_err("not a role");
        assert_eq!(err.to_string(), "unknown color role 'tertiary'");
    }

    #[test]
    fn serde_uses_wire_spelling() {
        let json = serde_json::to_string(&ScaleToken::Xl2).expect("serialize");
        assert_eq!(json, "\"2xl\"");
        let parsed: ColorRole =
            serde_json::from_str("\"primary-foreground\"").expect("deserialize");
        assert_eq!(parsed, ColorRole::PrimaryForeground);
    }

    #[test]
    fn foreground_pairs_point_at_foreground_roles() {
        let pairs = ColorRole::ALL
            .iter()
            .filter_map(|role| role.foreground_pair())
            .collect::<Vec<_>>();
        assert_eq!(pairs.len(), 8);
        assert!(pairs.iter().all(|role| role.as_str().ends_with("foreground")));
    }

    #[test]
    fn missing_tokens_lists_absent_members() {
        let missing = missing_tokens::<RadiusToken>(|token| token != RadiusToken::Full);
        assert_eq!(missing, vec![RadiusToken::Full]);
    }
}
