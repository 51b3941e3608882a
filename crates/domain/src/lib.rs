//! Domain layer for SunSync
//!
//! Contains the weather summary exchanged between a data node and its paired
//! display nodes, the wire codec for that summary, the condition-category
//! table, and the display state derived from it. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
pub mod wire;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
pub use wire::{UPDATE_REQUEST, WireError, decode, encode, is_update_request};
