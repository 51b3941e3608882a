//! Presentation port
//!
//! The presentation layer owns rendering and its timing. The sync services
//! only hand it complete display states, by value.

use domain::DisplayState;
#[cfg(test)]
use mockall::automock;

/// Port for handing display states to the presentation layer
#[cfg_attr(test, automock)]
pub trait PresentationPort: Send + Sync {
    /// Show a newly applied display state
    fn present(&self, state: DisplayState);
}
