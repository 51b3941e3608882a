//! Message transport port
//!
//! Abstracts the point-to-point proximity transport between a data node and
//! its paired display nodes: session state, peer discovery and sending.
//! Inbound messages are delivered by the adapter as [`InboundMessage`]
//! values on a channel it hands out.

use async_trait::async_trait;
use domain::{ChannelPath, ConnectionState, PeerId};
#[cfg(test)]
use mockall::automock;
use tokio::sync::watch;

use crate::error::ApplicationError;

/// A message received from a peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Channel path the message was sent on
    pub path: String,
    /// Raw payload
    pub data: Vec<u8>,
    /// Sending peer
    pub from: PeerId,
}

impl InboundMessage {
    /// Create a new inbound message
    #[must_use]
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>, from: PeerId) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
            from,
        }
    }
}

/// Port for the device-to-device transport session
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Start establishing the session
    async fn connect(&self) -> Result<(), ApplicationError>;

    /// Current session state
    fn connection_state(&self) -> ConnectionState;

    /// Subscribe to session state changes
    fn watch_connection(&self) -> watch::Receiver<ConnectionState>;

    /// Snapshot of the peers reachable right now
    async fn connected_peers(&self) -> Result<Vec<PeerId>, ApplicationError>;

    /// Send a payload to one peer on a channel
    ///
    /// Resolves once the transport reports the delivery result.
    async fn send(
        &self,
        peer: &PeerId,
        path: &ChannelPath,
        payload: &[u8],
    ) -> Result<(), ApplicationError>;
}
