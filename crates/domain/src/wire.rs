//! Wire codec for weather summaries
//!
//! A summary travels as a single UTF-8 line of three integers joined by
//! `::`, in the fixed order `condition::high::low`:
//!
//! ```text
//! 500::22::14
//! ```
//!
//! There is no header, length prefix, escaping or version field. A payload
//! is only valid when it splits into exactly three integer fields.
//!
//! # Examples
//!
//! ```
//! use domain::{WeatherSummary, decode, encode};
//!
//! let bytes = encode(&WeatherSummary::new(500, 22, 14));
//! assert_eq!(bytes, b"500::22::14");
//! assert_eq!(decode(&bytes).unwrap(), WeatherSummary::new(500, 22, 14));
//! assert!(decode(b"").is_err());
//! ```

use thiserror::Error;

use crate::entities::WeatherSummary;

/// Field separator
pub const DELIMITER: &str = "::";

/// Number of fields in a summary payload
pub const FIELD_COUNT: usize = 3;

/// Payload a display node sends to ask data nodes for a fresh summary
pub const UPDATE_REQUEST: &[u8] = b"update_me";

/// Why an inbound payload could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Payload is not valid UTF-8
    #[error("payload is not valid UTF-8")]
    NotUtf8,

    /// Payload does not split into exactly three fields
    #[error("expected 3 fields, found {found}")]
    FieldCount {
        /// Number of fields present
        found: usize,
    },

    /// A field is not an integer
    #[error("field {index} is not an integer: {value:?}")]
    InvalidField {
        /// Zero-based field position
        index: usize,
        /// Offending text
        value: String,
    },
}

/// Serialize a summary to its wire form
#[must_use]
pub fn encode(summary: &WeatherSummary) -> Vec<u8> {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        summary.condition_code, summary.high, summary.low
    )
    .into_bytes()
}

/// Parse a summary from its wire form
pub fn decode(bytes: &[u8]) -> Result<WeatherSummary, WireError> {
    let text = std::str::from_utf8(bytes).map_err(|_| WireError::NotUtf8)?;
    let fields: Vec<&str> = text.split(DELIMITER).collect();

    let [condition, high, low] = fields.as_slice() else {
        return Err(WireError::FieldCount {
            found: fields.len(),
        });
    };

    Ok(WeatherSummary::new(
        parse_field(0, condition)?,
        parse_field(1, high)?,
        parse_field(2, low)?,
    ))
}

/// Check whether a payload is a display node's update request
#[must_use]
pub fn is_update_request(bytes: &[u8]) -> bool {
    bytes == UPDATE_REQUEST
}

fn parse_field(index: usize, value: &str) -> Result<i32, WireError> {
    value.parse().map_err(|_| WireError::InvalidField {
        index,
        value: value.to_string(),
    })
}
