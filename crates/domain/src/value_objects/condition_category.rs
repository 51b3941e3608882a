//! Condition category - Visual classification of a weather condition code
//!
//! The category is derived from a [`ConditionCode`] through an ordered table
//! of inclusive ranges. The first matching rule wins; codes no rule matches
//! fall back to [`ConditionCategory::Clear`].
//!
//! The table contains an overlap: 761 is covered both by the fog range
//! (701-761) and by the storm rule (761, 781). Because fog is listed first,
//! 761 always resolves to fog and only 781 reaches the storm rule. This
//! mirrors what deployed watch faces already display and is kept as-is.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{ConditionCategory, ConditionCode};
//!
//! assert_eq!(ConditionCategory::from_code(ConditionCode::new(500)), ConditionCategory::Rain);
//! assert_eq!(ConditionCategory::from_code(ConditionCode::new(761)), ConditionCategory::Fog);
//! assert_eq!(ConditionCategory::from_code(ConditionCode::new(42)), ConditionCategory::Clear);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConditionCode;

/// Visual weather category selecting the asset pair shown on a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    /// Thunderstorm
    Storm,
    /// Drizzle
    LightRain,
    /// Rain
    Rain,
    /// Snow and freezing rain
    Snow,
    /// Mist, smoke, haze, dust and fog
    Fog,
    /// Clear sky, also the fallback
    Clear,
    /// Few clouds
    LightClouds,
    /// Scattered to overcast clouds
    Clouds,
}

/// Identifiers of the two visual assets a display shows for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetPair {
    /// Full-screen background art, shown in interactive mode
    pub scene: &'static str,
    /// Small icon, shown in ambient mode
    pub icon: &'static str,
}

impl AssetPair {
    /// Assets shown before the first summary arrives
    pub const INITIAL: Self = Self {
        scene: "art_clear",
        icon: "ic_cloudy",
    };
}

/// How a rule selects condition codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    /// Inclusive range `first..=last`
    Range(i32, i32),
    /// Any of the listed codes
    AnyOf(&'static [i32]),
}

impl CodeMatch {
    /// Check whether the code is selected by this matcher
    #[must_use]
    pub fn matches(&self, code: i32) -> bool {
        match *self {
            Self::Range(first, last) => (first..=last).contains(&code),
            Self::AnyOf(codes) => codes.contains(&code),
        }
    }
}

/// One row of the category table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Codes this rule covers
    pub codes: CodeMatch,
    /// Category assigned when the rule matches
    pub category: ConditionCategory,
}

impl CategoryRule {
    const fn range(first: i32, last: i32, category: ConditionCategory) -> Self {
        Self {
            codes: CodeMatch::Range(first, last),
            category,
        }
    }

    const fn any_of(codes: &'static [i32], category: ConditionCategory) -> Self {
        Self {
            codes: CodeMatch::AnyOf(codes),
            category,
        }
    }
}

/// Ordered category table, evaluated first-match-wins
pub const CATEGORY_RULES: [CategoryRule; 11] = [
    CategoryRule::range(200, 232, ConditionCategory::Storm),
    CategoryRule::range(300, 321, ConditionCategory::LightRain),
    CategoryRule::range(500, 504, ConditionCategory::Rain),
    CategoryRule::any_of(&[511], ConditionCategory::Snow),
    CategoryRule::range(520, 531, ConditionCategory::Rain),
    CategoryRule::range(600, 622, ConditionCategory::Snow),
    CategoryRule::range(701, 761, ConditionCategory::Fog),
    CategoryRule::any_of(&[761, 781], ConditionCategory::Storm),
    CategoryRule::any_of(&[800], ConditionCategory::Clear),
    CategoryRule::any_of(&[801], ConditionCategory::LightClouds),
    CategoryRule::range(802, 804, ConditionCategory::Clouds),
];

impl ConditionCategory {
    /// Classify a condition code
    #[must_use]
    pub fn from_code(code: ConditionCode) -> Self {
        let raw = code.value();
        CATEGORY_RULES
            .iter()
            .find(|rule| rule.codes.matches(raw))
            .map_or(Self::Clear, |rule| rule.category)
    }

    /// Get a human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Storm => "Storm",
            Self::LightRain => "Light rain",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Fog => "Fog",
            Self::Clear => "Clear",
            Self::LightClouds => "Light clouds",
            Self::Clouds => "Clouds",
        }
    }

    /// Get the scene and icon assets for this category
    #[must_use]
    pub const fn assets(&self) -> AssetPair {
        let (scene, icon) = match self {
            Self::Storm => ("art_storm", "ic_storm"),
            Self::LightRain => ("art_light_rain", "ic_light_rain"),
            Self::Rain => ("art_rain", "ic_rain"),
            Self::Snow => ("art_snow", "ic_snow"),
            Self::Fog => ("art_fog", "ic_fog"),
            Self::Clear => ("art_clear", "ic_clear"),
            Self::LightClouds => ("art_light_clouds", "ic_light_clouds"),
            Self::Clouds => ("art_clouds", "ic_cloudy"),
        };
        AssetPair { scene, icon }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(code: i32) -> ConditionCategory {
        ConditionCategory::from_code(ConditionCode::new(code))
    }

    #[test]
    fn storm_range() {
        assert_eq!(category(200), ConditionCategory::Storm);
        assert_eq!(category(232), ConditionCategory::Storm);
        assert_eq!(category(233), ConditionCategory::Clear);
    }

    #[test]
    fn light_rain_range() {
        assert_eq!(category(300), ConditionCategory::LightRain);
        assert_eq!(category(321), ConditionCategory::LightRain);
    }

    #[test]
    fn rain_ranges_surround_freezing_rain() {
        assert_eq!(category(504), ConditionCategory::Rain);
        assert_eq!(category(511), ConditionCategory::Snow);
        assert_eq!(category(520), ConditionCategory::Rain);
        assert_eq!(category(531), ConditionCategory::Rain);
        assert_eq!(category(510), ConditionCategory::Clear);
    }

    #[test]
    fn snow_range() {
        assert_eq!(category(600), ConditionCategory::Snow);
        assert_eq!(category(622), ConditionCategory::Snow);
    }

    #[test]
    fn overlapping_761_resolves_to_fog() {
        assert_eq!(category(701), ConditionCategory::Fog);
        assert_eq!(category(761), ConditionCategory::Fog);
        assert_eq!(category(781), ConditionCategory::Storm);
    }

    #[test]
    fn clouds_and_clear() {
        assert_eq!(category(800), ConditionCategory::Clear);
        assert_eq!(category(801), ConditionCategory::LightClouds);
        assert_eq!(category(802), ConditionCategory::Clouds);
        assert_eq!(category(804), ConditionCategory::Clouds);
    }

    #[test]
    fn unknown_codes_fall_back_to_clear() {
        for code in [i32::MIN, -1, 0, 199, 400, 771, 805, 9_999, i32::MAX] {
            assert_eq!(category(code), ConditionCategory::Clear, "code {code}");
        }
    }

    #[test]
    fn assets_follow_category() {
        let rain = ConditionCategory::Rain.assets();
        assert_eq!(rain.scene, "art_rain");
        assert_eq!(rain.icon, "ic_rain");
        assert_eq!(ConditionCategory::Clouds.assets().icon, "ic_cloudy");
    }

    #[test]
    fn initial_assets_mix_clear_scene_and_cloudy_icon() {
        assert_eq!(AssetPair::INITIAL.scene, "art_clear");
        assert_eq!(AssetPair::INITIAL.icon, "ic_cloudy");
    }

    #[test]
    fn display_uses_description() {
        assert_eq!(ConditionCategory::LightRain.to_string(), "Light rain");
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ConditionCategory::LightClouds).unwrap();
        assert_eq!(json, "\"light_clouds\"");
    }
}
