//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A stored weather record cannot be turned into a summary
    #[error("Invalid weather record: {0}")]
    InvalidWeatherRecord(String),

    /// Invalid peer identifier
    #[error("Invalid peer id: {0}")]
    InvalidPeerId(String),

    /// Invalid channel path
    #[error("Invalid channel path: {0}")]
    InvalidChannelPath(String),
}
