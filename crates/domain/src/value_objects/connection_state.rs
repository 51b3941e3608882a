//! Transport connection state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Connection state of a transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No session
    #[default]
    Disconnected,
    /// Session is being established
    Connecting,
    /// Session is ready to send
    Connected,
}

impl ConnectionState {
    /// Check whether messages can be sent
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}
