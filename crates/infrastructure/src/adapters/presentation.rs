//! Presentation sinks
//!
//! Headless stand-ins for a watch-face renderer: one logs every applied
//! display state, the other forwards it to a channel for a render loop or
//! a test to consume.

use application::PresentationPort;
use domain::{DisplayState, FaceEvent, FaceLifecycle};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Logs each display state as a structured event
///
/// The face lifecycle decides which asset would be drawn: the scene while
/// interactive, the icon in ambient mode.
#[derive(Debug, Clone, Default)]
pub struct TracingPresentation {
    node: Option<String>,
    face: FaceLifecycle,
}

impl TracingPresentation {
    /// Create a sink
    #[must_use]
    pub const fn new() -> Self {
        Self {
            node: None,
            face: FaceLifecycle::new(),
        }
    }

    /// Tag every event with a node name
    #[must_use]
    pub fn for_node(node: impl Into<String>) -> Self {
        Self {
            node: Some(node.into()),
            face: FaceLifecycle::new(),
        }
    }

    /// Apply lifecycle events before the first state is presented
    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = FaceEvent>) -> Self {
        for event in events {
            self.face.apply(event);
        }
        self
    }

    /// Current face lifecycle
    #[must_use]
    pub const fn face(&self) -> &FaceLifecycle {
        &self.face
    }

    /// Asset the face would draw for `state`
    #[must_use]
    pub const fn drawn_asset(&self, state: &DisplayState) -> &'static str {
        self.face.asset_for(state)
    }
}

impl PresentationPort for TracingPresentation {
    fn present(&self, state: DisplayState) {
        info!(
            node = self.node.as_deref().unwrap_or("-"),
            high = %state.high_text,
            low = %state.low_text,
            condition = %state.condition_code,
            category = %state.category,
            drawn = self.drawn_asset(&state),
            ambient = self.face.is_ambient(),
            anti_alias = self.face.anti_alias(),
            "Display updated"
        );
    }
}

/// Forwards each display state to an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelPresentation {
    tx: mpsc::UnboundedSender<DisplayState>,
}

impl ChannelPresentation {
    /// Create a sink and the receiver its states arrive on
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DisplayState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PresentationPort for ChannelPresentation {
    fn present(&self, state: DisplayState) {
        if self.tx.send(state).is_err() {
            debug!("Presentation receiver dropped, display state discarded");
        }
    }
}
