//! Weather summary - The payload exchanged between nodes

use serde::{Deserialize, Serialize};

use super::WeatherRecord;
use crate::errors::DomainError;
use crate::value_objects::{ConditionCategory, ConditionCode};

/// The day's weather reduced to a condition code and rounded high/low
///
/// All three fields are always present together. A summary is immutable
/// once built; receivers construct a fresh one for every inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Weather condition code
    pub condition_code: ConditionCode,
    /// Daily high, whole degrees
    pub high: i32,
    /// Daily low, whole degrees
    pub low: i32,
}

impl WeatherSummary {
    /// Create a summary from already-rounded values
    #[must_use]
    pub fn new(condition_code: impl Into<ConditionCode>, high: i32, low: i32) -> Self {
        Self {
            condition_code: condition_code.into(),
            high,
            low,
        }
    }

    /// Build a summary from a stored record, rounding both temperatures
    ///
    /// Rounding is half-up (`21.5 -> 22`, `-2.5 -> -2`).
    pub fn from_record(record: &WeatherRecord) -> Result<Self, DomainError> {
        Ok(Self {
            condition_code: record.condition_id,
            high: round_half_up("max_temp", record.max_temp)?,
            low: round_half_up("min_temp", record.min_temp)?,
        })
    }

    /// Category derived from the condition code
    #[must_use]
    pub fn category(&self) -> ConditionCategory {
        self.condition_code.category()
    }
}

impl TryFrom<&WeatherRecord> for WeatherSummary {
    type Error = DomainError;

    fn try_from(record: &WeatherRecord) -> Result<Self, Self::Error> {
        Self::from_record(record)
    }
}

#[allow(clippy::cast_possible_truncation)] // bounds checked against i32 range
fn round_half_up(field: &str, value: f64) -> Result<i32, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidWeatherRecord(format!(
            "{field} is not a finite number: {value}"
        )));
    }
    // `value + 0.5` can round up in floating point just below a half
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return Err(DomainError::InvalidWeatherRecord(format!(
            "{field} out of range: {value}"
        )));
    }
    Ok(rounded as i32)
}
