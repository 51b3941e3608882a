//! Domain entities - Values produced and consumed by the sync services

mod display_state;
mod face_lifecycle;
mod weather_record;
mod weather_summary;

pub use display_state::{DEGREE_SIGN, DisplayState};
pub use face_lifecycle::{FaceEvent, FaceLifecycle, INTERACTIVE_TICK_MS};
pub use weather_record::WeatherRecord;
pub use weather_summary::WeatherSummary;
