//! Channel path - Identifies a logical message stream between peers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A message channel path such as `/weather_update`
///
/// Paths are compared ASCII case-insensitively when matching inbound
/// messages; the configured spelling is what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelPath(String);

impl ChannelPath {
    /// Path shared by data and display nodes for weather updates
    pub const WEATHER_UPDATE: &'static str = "/weather_update";

    /// Create a channel path; it must start with `/` and contain no whitespace
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(DomainError::InvalidChannelPath(format!(
                "{path}: must start with '/'"
            )));
        }
        if path.len() < 2 {
            return Err(DomainError::InvalidChannelPath(
                "path must name a channel".to_string(),
            ));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidChannelPath(format!(
                "{path}: must not contain whitespace"
            )));
        }
        Ok(Self(path))
    }

    /// The default weather update channel
    #[must_use]
    pub fn weather_update() -> Self {
        Self(Self::WEATHER_UPDATE.to_string())
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether an inbound path addresses this channel
    pub fn matches(&self, path: &str) -> bool {
        self.0.eq_ignore_ascii_case(path)
    }
}

impl Default for ChannelPath {
    fn default() -> Self {
        Self::weather_update()
    }
}

impl fmt::Display for ChannelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ChannelPath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelPath> for String {
    fn from(path: ChannelPath) -> Self {
        path.0
    }
}
