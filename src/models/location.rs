//! Geocoded location model

use serde::{Deserialize, Serialize};

/// A place resolved by the geocoding service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodedLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone name (e.g. "Europe/London")
    pub timezone: String,
    /// Resolved place name
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2), when the service knows it
    pub country_code: Option<String>,
}

impl GeocodedLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, timezone: String, name: String) -> Self {
        Self {
            latitude,
            longitude,
            timezone,
            name,
            country_code: None,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
