//! Update-request flow
//!
//! A display node that comes online asks for fresh data: once its
//! transport connects it sends [`UPDATE_REQUEST`] to every peer. A data
//! node answers by running the sender. The data-node side does not look at
//! path or payload; every inbound message is treated as a request.

use std::fmt;
use std::sync::Arc;

use domain::{ChannelPath, UPDATE_REQUEST};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::fan_out::{PeerOutcome, fan_out};
use super::readiness::{ReadinessPolicy, wait_until_ready};
use super::sync_sender::{SendReport, SyncSender, SyncTrigger};
use crate::error::ApplicationError;
use crate::ports::{InboundMessage, TransportPort};

/// Display-node side: asks connected data nodes for a fresh summary
#[derive(Clone)]
pub struct UpdateRequester {
    transport: Arc<dyn TransportPort>,
    channel: ChannelPath,
    readiness: ReadinessPolicy,
}

impl fmt::Debug for UpdateRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequester")
            .field("channel", &self.channel)
            .field("readiness", &self.readiness)
            .finish_non_exhaustive()
    }
}

impl UpdateRequester {
    /// Create a requester
    pub fn new(
        transport: Arc<dyn TransportPort>,
        channel: ChannelPath,
        readiness: ReadinessPolicy,
    ) -> Self {
        Self {
            transport,
            channel,
            readiness,
        }
    }

    /// Send an update request to every connected peer
    #[instrument(skip(self), fields(channel = %self.channel))]
    pub async fn request_update(&self) -> Result<Vec<PeerOutcome>, ApplicationError> {
        wait_until_ready(self.transport.as_ref(), &self.readiness)
            .await
            .inspect_err(|e| warn!(error = %e, "Update request not sent"))?;

        let peers = self.transport.connected_peers().await?;
        let outcomes = fan_out(
            self.transport.as_ref(),
            &peers,
            &self.channel,
            UPDATE_REQUEST,
        )
        .await;

        info!(peers = outcomes.len(), "Update requested");
        Ok(outcomes)
    }

    /// Request an update every time the transport becomes connected
    ///
    /// Runs until the transport drops its state channel.
    pub fn spawn_on_connect(self) -> JoinHandle<()> {
        let mut state = self.transport.watch_connection();
        tokio::spawn(async move {
            loop {
                if state.wait_for(|s| s.is_connected()).await.is_err() {
                    break;
                }
                if let Err(e) = self.request_update().await {
                    debug!(error = %e, "Update request on connect failed");
                }
                if state.wait_for(|s| !s.is_connected()).await.is_err() {
                    break;
                }
            }
            debug!("Transport state channel closed, requester stopped");
        })
    }
}

/// Data-node side: turns inbound messages into sync runs
#[derive(Debug, Clone)]
pub struct UpdateListener {
    sender: SyncSender,
}

impl UpdateListener {
    /// Create a listener driving `sender`
    #[must_use]
    pub const fn new(sender: SyncSender) -> Self {
        Self { sender }
    }

    /// React to one inbound message by starting a sync run
    pub fn on_message(&self, message: &InboundMessage) -> JoinHandle<Option<SendReport>> {
        info!(
            from = %message.from,
            path = %message.path,
            bytes = message.data.len(),
            "Message received, starting sync"
        );
        self.sender.trigger(SyncTrigger::UpdateRequested {
            from: message.from.clone(),
        })
    }

    /// Consume inbound messages until the transport closes the channel
    pub fn spawn(self, mut inbound: mpsc::Receiver<InboundMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(message) = inbound.recv().await {
                drop(self.on_message(&message));
            }
            debug!("Inbound channel closed, listener stopped");
        })
    }
}
