//! Persistence module
//!
//! SQLite-backed local weather store.

pub mod connection;
pub mod migrations;
pub mod weather_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use weather_store::SqliteWeatherStore;
