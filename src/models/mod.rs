//! Data models for the weather widget
//!
//! - Location: a geocoded place
//! - Forecast: normalized daily records and the resolved sequence outcome

pub mod forecast;
pub mod location;

pub use forecast::{DailyForecast, ResolvedForecast};
pub use location::GeocodedLocation;
