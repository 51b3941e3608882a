//! Display state - What a display node currently shows
//!
//! The state is an immutable value. Every accepted summary produces a new
//! state that replaces the previous one as a whole, so a renderer never sees
//! a condition code paired with stale temperatures.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::WeatherSummary;
use crate::value_objects::{AssetPair, ConditionCategory, ConditionCode};

/// Suffix appended to rendered temperatures
pub const DEGREE_SIGN: char = 'º';

/// Placeholder shown before any summary has arrived
const PLACEHOLDER: &str = "-";

/// Presentation fields derived from the latest weather summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// High temperature text, e.g. `22º|`
    pub high_text: String,
    /// Low temperature text, e.g. `14º`
    pub low_text: String,
    /// Condition code the state was derived from
    pub condition_code: ConditionCode,
    /// Category selected by the condition code
    pub category: ConditionCategory,
    /// Scene and icon assets to draw
    pub assets: AssetPair,
    /// When the summary was applied; `None` for the initial state
    pub updated_at: Option<DateTime<Utc>>,
}

impl DisplayState {
    /// State shown before the first message arrives
    #[must_use]
    pub fn initial() -> Self {
        Self {
            high_text: PLACEHOLDER.to_string(),
            low_text: PLACEHOLDER.to_string(),
            condition_code: ConditionCode::UNKNOWN,
            category: ConditionCategory::Clear,
            assets: AssetPair::INITIAL,
            updated_at: None,
        }
    }

    /// Derive the display state for a received summary
    #[must_use]
    pub fn from_summary(summary: &WeatherSummary, at: DateTime<Utc>) -> Self {
        let category = summary.category();
        Self {
            high_text: format!("{}{DEGREE_SIGN}|", summary.high),
            low_text: format!("{}{DEGREE_SIGN}", summary.low),
            condition_code: summary.condition_code,
            category,
            assets: category.assets(),
            updated_at: Some(at),
        }
    }

    /// Check whether any summary has been applied yet
    #[must_use]
    pub const fn has_weather(&self) -> bool {
        self.updated_at.is_some()
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::initial()
    }
}
