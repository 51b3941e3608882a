//! Application layer - Sync use cases and orchestration
//!
//! Defines the ports through which the sync services reach the local weather
//! store, the message transport and the presentation layer, and the services
//! that push summaries from data nodes to display nodes.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
