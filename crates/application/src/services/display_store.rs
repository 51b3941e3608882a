//! Current display state of a display node
//!
//! The state lives behind an atomic pointer swap. Readers load an
//! `Arc<DisplayState>` and keep it for as long as they draw, while the
//! receiver replaces the whole value on every accepted summary. A version
//! counter on a watch channel lets render loops wake up on changes.

use std::sync::Arc;

use arc_swap::ArcSwap;
use domain::DisplayState;
use tokio::sync::watch;

/// Atomically replaced display state with change notifications
#[derive(Debug, Clone)]
pub struct DisplayStore {
    inner: Arc<ArcSwap<DisplayState>>,
    notify: Arc<watch::Sender<u64>>,
}

impl DisplayStore {
    /// Create a store holding the initial placeholder state
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(DisplayState::initial())
    }

    /// Create a store holding the given state
    #[must_use]
    pub fn with_state(state: DisplayState) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(ArcSwap::from_pointee(state)),
            notify: Arc::new(notify),
        }
    }

    /// Get the current state
    #[must_use]
    pub fn current(&self) -> Arc<DisplayState> {
        self.inner.load_full()
    }

    /// Replace the state and bump the version
    ///
    /// Returns the state that was replaced.
    pub fn replace(&self, state: Arc<DisplayState>) -> Arc<DisplayState> {
        let previous = self.inner.swap(state);
        self.notify.send_modify(|version| *version += 1);
        previous
    }

    /// Number of replacements so far
    #[must_use]
    pub fn version(&self) -> u64 {
        *self.notify.borrow()
    }

    /// Subscribe to version changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }
}

impl Default for DisplayStore {
    fn default() -> Self {
        Self::new()
    }
}
