//! Logging setup
//!
//! Installs a global `tracing` subscriber with an environment-overridable
//! filter and either human-readable or JSON output.

mod logging;

pub use logging::{TelemetryError, init_logging};
