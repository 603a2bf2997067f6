use async_trait::async_trait;

use crate::Result;
use crate::models::{DailyForecast, GeocodedLocation};

pub mod open_meteo;

/// Remote lookups the fetch sequence depends on.
///
/// `geocode` returns candidates in ranking order and an empty list when
/// nothing matches; deciding what "no match" means is left to the caller.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Resolve a free-text place name to candidate locations
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedLocation>>;

    /// Fetch the daily forecast for a resolved location
    async fn daily_forecast(&self, location: &GeocodedLocation) -> Result<Vec<DailyForecast>>;
}
