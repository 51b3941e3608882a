//! Local weather store port
//!
//! Defines the interface the sender uses to read today's stored forecast.

use async_trait::async_trait;
use domain::WeatherRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading the locally stored forecast
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherStorePort: Send + Sync {
    /// Get today's record for a location
    ///
    /// Returns the earliest record dated today or later, or `None` when the
    /// store holds nothing for the location.
    async fn today(&self, location: &str) -> Result<Option<WeatherRecord>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherStorePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherStorePort>();
    }
}
