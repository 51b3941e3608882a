//! Port definitions for application layer
//!
//! Ports are interfaces that define how the sync services interact with
//! external collaborators. Adapters in the infrastructure layer implement
//! these ports.

mod presentation_port;
mod transport_port;
mod weather_store_port;

#[cfg(test)]
pub use presentation_port::MockPresentationPort;
pub use presentation_port::PresentationPort;
#[cfg(test)]
pub use transport_port::MockTransportPort;
pub use transport_port::{InboundMessage, TransportPort};
#[cfg(test)]
pub use weather_store_port::MockWeatherStorePort;
pub use weather_store_port::WeatherStorePort;
