//! Daily forecast model

use super::GeocodedLocation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast day, normalized from the service's parallel arrays
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Local calendar date at the forecast location
    pub date: NaiveDate,
    /// WMO weather code
    pub weather_code: i32,
    /// Daily maximum temperature in Celsius, unrounded
    pub temp_max: f64,
    /// Daily minimum temperature in Celsius, unrounded
    pub temp_min: f64,
}

/// Outcome of a successful geocode-then-forecast sequence
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedForecast {
    /// First geocoding candidate for the query
    pub location: GeocodedLocation,
    /// Resolved name followed by the country flag
    pub display_label: String,
    /// Days in service order; the first one is today
    pub days: Vec<DailyForecast>,
}

impl ResolvedForecast {
    /// Iterate days paired with whether each one is today
    pub fn days_with_today(&self) -> impl Iterator<Item = (&DailyForecast, bool)> {
        self.days.iter().enumerate().map(|(i, day)| (day, i == 0))
    }
}
