//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod loopback_transport;
mod presentation;

pub use loopback_transport::{LoopbackHub, LoopbackTransport};
pub use presentation::{ChannelPresentation, TracingPresentation};
