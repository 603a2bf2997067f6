//! HTTP client for the `OpenMeteo` geocoding and forecast endpoints
//!
//! Endpoint base URLs and the per-request timeout come from
//! [`ServicesConfig`]; each call is a single GET with no retries.

use crate::config::ServicesConfig;
use crate::models::{DailyForecast, GeocodedLocation};
use crate::weather::WeatherSource;
use crate::weather::open_meteo::{DAILY_FIELDS, ForecastResponse, GeocodingResponse};
use crate::{Result, WeatherError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

const USER_AGENT: &str = concat!("classy-weather/", env!("CARGO_PKG_VERSION"));

/// Failure of a single GET, before it is attributed to geocoding or forecast
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Transport(e)
        }
    }
}

/// Weather API client for `OpenMeteo`
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
        })
    }

    fn geocoding_request_url(&self, query: &str) -> String {
        format!("{}?name={}", self.geocoding_url, urlencoding::encode(query))
    }

    fn forecast_request_url(&self, location: &GeocodedLocation) -> String {
        format!(
            "{}?latitude={}&longitude={}&timezone={}&daily={}",
            self.forecast_url,
            location.latitude,
            location.longitude,
            urlencoding::encode(&location.timezone),
            DAILY_FIELDS
        )
    }

    /// Send a GET and hand back the response only if it has a success status
    async fn get(&self, url: &str) -> std::result::Result<Response, RequestError> {
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RequestError::Status(status))
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodedLocation>> {
        info!("Geocoding location name: {}", query);

        let response = self
            .get(&self.geocoding_request_url(query))
            .await
            .map_err(|e| {
                error!("Geocoding request failed: {}", e);
                WeatherError::geocoding(e.to_string())
            })?;

        let body: GeocodingResponse = response.json().await.map_err(|e| {
            error!("Failed to parse geocoding response: {}", e);
            WeatherError::geocoding(format!("invalid geocoding response: {e}"))
        })?;

        let locations = body.into_locations();
        debug!("Geocoding returned {} candidate(s)", locations.len());
        Ok(locations)
    }

    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn daily_forecast(&self, location: &GeocodedLocation) -> Result<Vec<DailyForecast>> {
        info!(
            "Getting daily forecast for {} ({})",
            location.name,
            location.format_coordinates()
        );

        let response = self
            .get(&self.forecast_request_url(location))
            .await
            .map_err(|e| {
                error!("Forecast request failed: {}", e);
                WeatherError::forecast(e.to_string())
            })?;

        let body: ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response: {}", e);
            WeatherError::forecast(format!("invalid forecast response: {e}"))
        })?;

        let days = body.into_days()?;
        info!("Retrieved {} forecast day(s)", days.len());
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_the_code() {
        let err = RequestError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "unexpected status 503 Service Unavailable");
        assert!(
            WeatherError::forecast(err.to_string())
                .to_string()
                .contains("503")
        );
    }

    fn client() -> WeatherApiClient {
        let config = ServicesConfig {
            geocoding_url: "https://geo.example.com/v1/search/".to_string(),
            forecast_url: "https://wx.example.com/v1/forecast".to_string(),
            timeout_seconds: 5,
        };
        WeatherApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_geocoding_url_encodes_query() {
        assert_eq!(
            client().geocoding_request_url("São Paulo & co"),
            "https://geo.example.com/v1/search?name=S%C3%A3o%20Paulo%20%26%20co"
        );
    }

    #[test]
    fn test_forecast_url_carries_location_and_fields() {
        let location = GeocodedLocation::new(
            51.5,
            -0.12,
            "Europe/London".to_string(),
            "London".to_string(),
        );
        assert_eq!(
            client().forecast_request_url(&location),
            "https://wx.example.com/v1/forecast?latitude=51.5&longitude=-0.12&timezone=Europe%2FLondon&daily=weathercode,temperature_2m_max,temperature_2m_min"
        );
    }
}
