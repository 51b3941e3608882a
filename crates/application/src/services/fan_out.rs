//! Independent per-peer delivery
//!
//! The same payload is sent to every peer of a snapshot concurrently. Each
//! send resolves on its own; a failing or slow peer does not change what
//! the others receive.

use std::fmt;

use domain::{ChannelPath, PeerId};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::ApplicationError;
use crate::ports::TransportPort;

/// Result of delivering to one peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The transport accepted the message
    Delivered,
    /// The transport reported a failure
    Failed(String),
}

impl DeliveryStatus {
    /// Check whether delivery succeeded
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Delivery outcome for a single peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerOutcome {
    /// Peer the payload was addressed to
    pub peer: PeerId,
    /// What the transport reported
    pub status: DeliveryStatus,
}

/// Send one payload to each peer concurrently
///
/// Outcomes come back in the order of `peers`.
pub async fn fan_out(
    transport: &dyn TransportPort,
    peers: &[PeerId],
    path: &ChannelPath,
    payload: &[u8],
) -> Vec<PeerOutcome> {
    let sends = peers.iter().map(|peer| async move {
        let status = match transport.send(peer, path, payload).await {
            Ok(()) => {
                debug!(peer = %peer, path = %path, "Payload delivered");
                DeliveryStatus::Delivered
            },
            Err(e) => {
                let reason = e.to_string();
                let failure = ApplicationError::PeerSend {
                    peer: peer.to_string(),
                    reason: reason.clone(),
                };
                warn!(path = %path, error = %failure, "Payload delivery failed");
                DeliveryStatus::Failed(reason)
            },
        };
        PeerOutcome {
            peer: peer.clone(),
            status,
        }
    });

    join_all(sends).await
}
