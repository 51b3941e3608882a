//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the SQLite
//! weather store, the in-process loopback transport and the presentation
//! sinks. Also owns configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, SyncConfig, TelemetryAppConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteWeatherStore, create_pool};
pub use telemetry::{TelemetryError, init_logging};
