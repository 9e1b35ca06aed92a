//! Weather input records for SkyGuess.
//!
//! The prediction game never fetches weather itself; it consumes the
//! observation records defined here from whatever provider the host uses.

pub mod observation;
pub mod types;

pub use observation::{ObservationCondition, WeatherObservation};
pub use types::*;
