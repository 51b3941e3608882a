//! Weather record as held by the local weather store

use serde::{Deserialize, Serialize};

use crate::value_objects::ConditionCode;

/// Today's stored forecast for a location
///
/// Temperatures are kept exactly as stored; rounding happens only when the
/// record is turned into a [`WeatherSummary`](super::WeatherSummary).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Weather condition id
    pub condition_id: ConditionCode,
    /// Daily maximum temperature
    pub max_temp: f64,
    /// Daily minimum temperature
    pub min_temp: f64,
}

impl WeatherRecord {
    /// Create a new record
    #[must_use]
    pub fn new(condition_id: impl Into<ConditionCode>, max_temp: f64, min_temp: f64) -> Self {
        Self {
            condition_id: condition_id.into(),
            max_temp,
            min_temp,
        }
    }
}
