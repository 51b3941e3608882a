//! Sync receiver - Applies inbound weather summaries on a display node
//!
//! Messages on other channel paths are ignored, as are update requests from
//! sibling display nodes sharing the channel. A payload that fails to
//! decode is logged and dropped, leaving the previous display state in
//! place. A valid payload yields a fresh [`DisplayState`] that replaces the
//! current one in a single swap and is handed to the presentation layer.

use std::sync::Arc;

use chrono::Utc;
use domain::{ChannelPath, DisplayState, PeerId, WireError, decode, is_update_request};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::display_store::DisplayStore;
use crate::ports::{InboundMessage, PresentationPort};

/// What the receiver did with an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// The message was for another channel
    Ignored,
    /// The payload was malformed; display state unchanged
    Rejected(WireError),
    /// The payload was applied
    Applied(Arc<DisplayState>),
}

/// Sync receiver running on a display node
#[derive(Clone)]
pub struct SyncReceiver {
    channel: ChannelPath,
    store: DisplayStore,
    presentation: Arc<dyn PresentationPort>,
}

impl std::fmt::Debug for SyncReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncReceiver")
            .field("channel", &self.channel)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SyncReceiver {
    /// Create a receiver listening on `channel`
    pub fn new(
        channel: ChannelPath,
        store: DisplayStore,
        presentation: Arc<dyn PresentationPort>,
    ) -> Self {
        Self {
            channel,
            store,
            presentation,
        }
    }

    /// Display state store this receiver writes to
    #[must_use]
    pub const fn store(&self) -> &DisplayStore {
        &self.store
    }

    /// Handle one message from a peer
    #[instrument(skip(self, data), fields(from = %from, bytes = data.len()))]
    pub fn on_message(&self, path: &str, data: &[u8], from: &PeerId) -> ReceiveOutcome {
        if !self.channel.matches(path) {
            debug!("Message on unrelated channel ignored");
            return ReceiveOutcome::Ignored;
        }

        if is_update_request(data) {
            debug!("Update request from another display ignored");
            return ReceiveOutcome::Ignored;
        }

        let summary = match decode(data) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Malformed weather payload dropped");
                return ReceiveOutcome::Rejected(e);
            },
        };

        let state = Arc::new(DisplayState::from_summary(&summary, Utc::now()));
        self.store.replace(Arc::clone(&state));

        info!(
            condition = %summary.condition_code,
            category = %state.category,
            high = %state.high_text,
            low = %state.low_text,
            "Display state updated"
        );

        self.presentation.present(DisplayState::clone(&state));
        ReceiveOutcome::Applied(state)
    }

    /// Handle an inbound transport message
    pub fn handle(&self, message: &InboundMessage) -> ReceiveOutcome {
        self.on_message(&message.path, &message.data, &message.from)
    }

    /// Consume inbound messages until the transport closes the channel
    pub fn spawn(self, mut inbound: mpsc::Receiver<InboundMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(message) = inbound.recv().await {
                self.handle(&message);
            }
            debug!(channel = %self.channel, "Inbound channel closed, receiver stopped");
        })
    }
}
