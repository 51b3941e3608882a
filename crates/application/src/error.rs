//! Application-level errors

use domain::{DomainError, WireError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The transport did not connect within the readiness budget
    #[error("Transport not connected after {attempts} attempts")]
    TransportNotReady {
        /// Number of waits performed
        attempts: u32,
    },

    /// The local store has no record for today
    #[error("No weather data available for location '{location}'")]
    NoDataAvailable {
        /// Location that was queried
        location: String,
    },

    /// Inbound payload could not be decoded
    #[error("Malformed payload: {0}")]
    Parse(#[from] WireError),

    /// Delivery to a single peer failed
    #[error("Send to peer {peer} failed: {reason}")]
    PeerSend {
        /// Peer the message was addressed to
        peer: String,
        /// Failure reported by the transport
        reason: String,
    },

    /// Transport session error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local weather store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is an anticipated, non-fatal sync outcome
    ///
    /// These end a sync run quietly: they are logged where detected and
    /// never reach whoever triggered the run.
    pub const fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::TransportNotReady { .. }
                | Self::NoDataAvailable { .. }
                | Self::Parse(_)
                | Self::PeerSend { .. }
        )
    }
}
