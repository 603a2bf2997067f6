//! `OpenMeteo` API response structures and conversion utilities

use crate::models::{DailyForecast, GeocodedLocation};
use crate::{Result, WeatherError};
use chrono::NaiveDate;
use serde::Deserialize;

/// Daily fields requested from the forecast endpoint
pub const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Timezone the forecast endpoint resolves from the coordinates itself
const AUTO_TIMEZONE: &str = "auto";

/// Geocoding response from `OpenMeteo`. `results` is omitted entirely when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub country_code: Option<String>,
}

impl From<GeocodingResult> for GeocodedLocation {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone.unwrap_or_else(|| AUTO_TIMEZONE.to_string()),
            name: result.name,
            country_code: result.country_code,
        }
    }
}

impl GeocodingResponse {
    /// Candidates in service ranking order
    #[must_use]
    pub fn into_locations(self) -> Vec<GeocodedLocation> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(GeocodedLocation::from)
            .collect()
    }
}

/// Forecast response from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: Option<DailyData>,
}

/// Daily weather data from `OpenMeteo`, one parallel array per field
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "weathercode")]
    pub weather_code: Vec<Option<i32>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Normalize the payload into one record per day
    pub fn into_days(self) -> Result<Vec<DailyForecast>> {
        self.daily
            .ok_or_else(|| WeatherError::forecast("response has no daily section"))?
            .into_days()
    }
}

impl DailyData {
    /// Zip the parallel arrays into records. Arrays of unequal length, null
    /// entries and unparsable dates are all treated as a malformed payload.
    pub fn into_days(self) -> Result<Vec<DailyForecast>> {
        let len = self.time.len();
        if self.weather_code.len() != len
            || self.temperature_max.len() != len
            || self.temperature_min.len() != len
        {
            return Err(WeatherError::forecast(format!(
                "daily arrays have mismatched lengths (time={}, weathercode={}, max={}, min={})",
                len,
                self.weather_code.len(),
                self.temperature_max.len(),
                self.temperature_min.len()
            )));
        }

        self.time
            .into_iter()
            .zip(self.weather_code)
            .zip(self.temperature_max.into_iter().zip(self.temperature_min))
            .map(|((time, code), (max, min))| {
                let date = NaiveDate::parse_from_str(&time, "%Y-%m-%d")
                    .map_err(|e| WeatherError::forecast(format!("invalid date '{time}': {e}")))?;
                match (code, max, min) {
                    (Some(weather_code), Some(temp_max), Some(temp_min)) => Ok(DailyForecast {
                        date,
                        weather_code,
                        temp_max,
                        temp_min,
                    }),
                    _ => Err(WeatherError::forecast(format!("missing values for {time}"))),
                }
            })
            .collect()
    }
}
