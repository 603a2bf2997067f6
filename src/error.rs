//! Error types and handling for the Classy Weather widget

use thiserror::Error;

/// Main error type for the weather widget
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The geocoding service returned no candidate for the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The geocoding call itself failed (transport, status, timeout, body)
    #[error("Geocoding unavailable: {message}")]
    GeocodingUnavailable { message: String },

    /// The forecast call failed or returned a malformed payload
    #[error("Forecast unavailable: {message}")]
    ForecastUnavailable { message: String },

    /// Country code is not exactly two ASCII letters
    #[error("Invalid country code: {code:?}")]
    InvalidCountryCode { code: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherError {
    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::GeocodingUnavailable {
            message: message.into(),
        }
    }

    /// Create a new forecast error
    pub fn forecast<S: Into<String>>(message: S) -> Self {
        Self::ForecastUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_country_code<S: Into<String>>(code: S) -> Self {
        Self::InvalidCountryCode { code: code.into() }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::LocationNotFound { query } => {
                format!("No place called \"{query}\" was found. Check the spelling and try again.")
            }
            WeatherError::GeocodingUnavailable { .. } => {
                "Unable to look up that location right now. Please check your internet connection."
                    .to_string()
            }
            WeatherError::ForecastUnavailable { .. } => {
                "The forecast could not be loaded. Press Enter to try again.".to_string()
            }
            WeatherError::InvalidCountryCode { code } => {
                format!("Unknown country code: {code}")
            }
            WeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
