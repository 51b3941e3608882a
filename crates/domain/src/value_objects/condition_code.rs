//! Weather condition code value object
//!
//! Condition codes follow the OpenWeatherMap numbering (roughly 200-804).
//! Codes outside the known ranges are still valid values; they simply map
//! to the fallback category.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConditionCategory;

/// Externally defined weather condition identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(i32);

impl ConditionCode {
    /// Code used before any summary has been received
    pub const UNKNOWN: Self = Self(0);

    /// Wrap a raw condition code
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw code
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Classify this code using the ordered category table
    #[must_use]
    pub fn category(self) -> ConditionCategory {
        ConditionCategory::from_code(self)
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ConditionCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<ConditionCode> for i32 {
    fn from(code: ConditionCode) -> Self {
        code.0
    }
}
