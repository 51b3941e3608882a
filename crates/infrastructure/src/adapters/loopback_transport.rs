//! In-process loopback transport
//!
//! A [`LoopbackHub`] stands in for the proximity transport between one data
//! node and its paired display nodes. Each node joins the hub under a
//! [`PeerId`] and gets a [`LoopbackTransport`] plus the receiving end of its
//! inbox. The hub can make peers unreachable and can hold a node in
//! `Connecting` so readiness timeouts can be exercised.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use application::{ApplicationError, InboundMessage, TransportPort};
use async_trait::async_trait;
use domain::{ChannelPath, ConnectionState, PeerId};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

/// Inbox capacity per node
const INBOX_CAPACITY: usize = 64;

struct Node {
    inbox: mpsc::Sender<InboundMessage>,
    state: Arc<watch::Sender<ConnectionState>>,
}

#[derive(Default)]
struct HubState {
    nodes: HashMap<PeerId, Node>,
    unreachable: HashSet<PeerId>,
    blocked: HashSet<PeerId>,
}

/// Shared medium all loopback nodes are attached to
#[derive(Clone, Default)]
pub struct LoopbackHub {
    inner: Arc<Mutex<HubState>>,
}

impl std::fmt::Debug for LoopbackHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("LoopbackHub")
            .field("nodes", &state.nodes.len())
            .field("unreachable", &state.unreachable)
            .field("blocked", &state.blocked)
            .finish()
    }
}

impl LoopbackHub {
    /// Create an empty hub
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a node, returning its transport and inbox
    ///
    /// The node starts `Disconnected`.
    pub fn join(
        &self,
        id: PeerId,
    ) -> Result<(LoopbackTransport, mpsc::Receiver<InboundMessage>), ApplicationError> {
        let mut state = self.inner.lock();
        if state.nodes.contains_key(&id) {
            return Err(ApplicationError::Transport(format!(
                "node {id} already joined"
            )));
        }

        let (inbox, receiver) = mpsc::channel(INBOX_CAPACITY);
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        let state_tx = Arc::new(state_tx);
        state.nodes.insert(
            id.clone(),
            Node {
                inbox,
                state: Arc::clone(&state_tx),
            },
        );
        debug!(node = %id, "Node joined loopback hub");

        let transport = LoopbackTransport {
            id,
            hub: self.clone(),
            state: state_tx,
        };
        Ok((transport, receiver))
    }

    /// Make sends to `peer` fail, or succeed again
    pub fn set_unreachable(&self, peer: &PeerId, unreachable: bool) {
        let mut state = self.inner.lock();
        if unreachable {
            state.unreachable.insert(peer.clone());
        } else {
            state.unreachable.remove(peer);
        }
    }

    /// Keep `peer` in `Connecting` when it tries to connect
    pub fn block_connection(&self, peer: &PeerId, blocked: bool) {
        let mut state = self.inner.lock();
        if blocked {
            state.blocked.insert(peer.clone());
        } else {
            state.blocked.remove(peer);
        }
    }

    /// Drop `peer`'s session
    pub fn disconnect(&self, peer: &PeerId) {
        let state = self.inner.lock();
        if let Some(node) = state.nodes.get(peer) {
            node.state.send_replace(ConnectionState::Disconnected);
            debug!(node = %peer, "Node disconnected");
        }
    }

    /// Nodes currently connected, sorted by id
    #[must_use]
    pub fn connected_nodes(&self) -> Vec<PeerId> {
        let state = self.inner.lock();
        let mut nodes: Vec<PeerId> = state
            .nodes
            .iter()
            .filter(|(_, node)| node.state.borrow().is_connected())
            .map(|(id, _)| id.clone())
            .collect();
        nodes.sort();
        nodes
    }

    fn is_blocked(&self, peer: &PeerId) -> bool {
        self.inner.lock().blocked.contains(peer)
    }

    /// Inbox of a connected, reachable peer
    fn route(&self, peer: &PeerId) -> Result<mpsc::Sender<InboundMessage>, ApplicationError> {
        let state = self.inner.lock();
        if state.unreachable.contains(peer) {
            return Err(ApplicationError::Transport(format!(
                "peer {peer} unreachable"
            )));
        }
        match state.nodes.get(peer) {
            Some(node) if node.state.borrow().is_connected() => Ok(node.inbox.clone()),
            Some(_) => Err(ApplicationError::Transport(format!(
                "peer {peer} not connected"
            ))),
            None => Err(ApplicationError::Transport(format!("unknown peer {peer}"))),
        }
    }
}

/// One node's view of the loopback hub
#[derive(Clone)]
pub struct LoopbackTransport {
    id: PeerId,
    hub: LoopbackHub,
    state: Arc<watch::Sender<ConnectionState>>,
}

impl std::fmt::Debug for LoopbackTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopbackTransport")
            .field("id", &self.id)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl LoopbackTransport {
    /// This node's id
    #[must_use]
    pub const fn id(&self) -> &PeerId {
        &self.id
    }
}

#[async_trait]
impl TransportPort for LoopbackTransport {
    async fn connect(&self) -> Result<(), ApplicationError> {
        let next = if self.hub.is_blocked(&self.id) {
            ConnectionState::Connecting
        } else {
            ConnectionState::Connected
        };
        self.state.send_replace(next);
        debug!(node = %self.id, state = %next, "Connect requested");
        Ok(())
    }

    fn connection_state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    fn watch_connection(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    async fn connected_peers(&self) -> Result<Vec<PeerId>, ApplicationError> {
        if !self.connection_state().is_connected() {
            return Err(ApplicationError::Transport(
                "session not connected".to_string(),
            ));
        }
        Ok(self
            .hub
            .connected_nodes()
            .into_iter()
            .filter(|peer| *peer != self.id)
            .collect())
    }

    #[instrument(skip(self, payload), fields(from = %self.id, bytes = payload.len()))]
    async fn send(
        &self,
        peer: &PeerId,
        path: &ChannelPath,
        payload: &[u8],
    ) -> Result<(), ApplicationError> {
        if !self.connection_state().is_connected() {
            return Err(ApplicationError::Transport(
                "session not connected".to_string(),
            ));
        }

        let inbox = self.hub.route(peer)?;
        inbox
            .send(InboundMessage::new(
                path.as_str(),
                payload.to_vec(),
                self.id.clone(),
            ))
            .await
            .map_err(|_| ApplicationError::Transport(format!("peer {peer} stopped receiving")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> PeerId {
        PeerId::new(name).unwrap()
    }

    #[test]
    fn nodes_start_disconnected() {
        let hub = LoopbackHub::new();
        let (transport, _inbox) = hub.join(id("phone")).unwrap();
        assert_eq!(transport.connection_state(), ConnectionState::Disconnected);
        assert!(hub.connected_nodes().is_empty());
    }

    #[test]
    fn duplicate_join_is_rejected() {
        let hub = LoopbackHub::new();
        let _first = hub.join(id("phone")).unwrap();
        assert!(hub.join(id("phone")).is_err());
    }

    #[tokio::test]
    async fn connect_publishes_state() {
        let hub = LoopbackHub::new();
        let (transport, _inbox) = hub.join(id("phone")).unwrap();
        let mut state = transport.watch_connection();

        transport.connect().await.unwrap();

        state.changed().await.unwrap();
        assert_eq!(*state.borrow(), ConnectionState::Connected);
        assert_eq!(hub.connected_nodes(), vec![id("phone")]);
    }

    #[tokio::test]
    async fn blocked_node_stays_connecting() {
        let hub = LoopbackHub::new();
        let (transport, _inbox) = hub.join(id("watch")).unwrap();
        hub.block_connection(&id("watch"), true);

        transport.connect().await.unwrap();
        assert_eq!(transport.connection_state(), ConnectionState::Connecting);

        hub.block_connection(&id("watch"), false);
        transport.connect().await.unwrap();
        assert_eq!(transport.connection_state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn peers_exclude_self_and_disconnected_nodes() {
        let hub = LoopbackHub::new();
        let (phone, _p) = hub.join(id("phone")).unwrap();
        let (watch_a, _a) = hub.join(id("watch-a")).unwrap();
        let (_watch_b, _b) = hub.join(id("watch-b")).unwrap();
        phone.connect().await.unwrap();
        watch_a.connect().await.unwrap();

        assert_eq!(phone.connected_peers().await.unwrap(), vec![id("watch-a")]);
    }

    #[tokio::test]
    async fn send_delivers_to_inbox() {
        let hub = LoopbackHub::new();
        let (phone, _p) = hub.join(id("phone")).unwrap();
        let (watch, mut inbox) = hub.join(id("watch")).unwrap();
        phone.connect().await.unwrap();
        watch.connect().await.unwrap();

        phone
            .send(&id("watch"), &ChannelPath::weather_update(), b"500::22::14")
            .await
            .unwrap();

        let message = inbox.recv().await.unwrap();
        assert_eq!(message.path, "/weather_update");
        assert_eq!(message.data, b"500::22::14");
        assert_eq!(message.from, id("phone"));
    }

    #[tokio::test]
    async fn unreachable_peer_fails_send() {
        let hub = LoopbackHub::new();
        let (phone, _p) = hub.join(id("phone")).unwrap();
        let (watch, _w) = hub.join(id("watch")).unwrap();
        phone.connect().await.unwrap();
        watch.connect().await.unwrap();
        hub.set_unreachable(&id("watch"), true);

        let err = phone
            .send(&id("watch"), &ChannelPath::weather_update(), b"x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transport error: peer watch unreachable");
    }

    #[tokio::test]
    async fn disconnected_sender_cannot_send() {
        let hub = LoopbackHub::new();
        let (phone, _p) = hub.join(id("phone")).unwrap();
        let (watch, _w) = hub.join(id("watch")).unwrap();
        watch.connect().await.unwrap();

        assert!(
            phone
                .send(&id("watch"), &ChannelPath::weather_update(), b"x")
                .await
                .is_err()
        );
        assert!(phone.connected_peers().await.is_err());
    }

    #[tokio::test]
    async fn disconnect_resets_state() {
        let hub = LoopbackHub::new();
        let (phone, _p) = hub.join(id("phone")).unwrap();
        phone.connect().await.unwrap();

        hub.disconnect(&id("phone"));
        assert_eq!(phone.connection_state(), ConnectionState::Disconnected);
    }
}
