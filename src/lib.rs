//! `Classy Weather` - terminal weather lookup
//!
//! Resolves a free-text place name with the `OpenMeteo` geocoding API,
//! fetches its daily forecast and renders an iconified summary. The widget
//! controller guards against stale responses so that only the latest query's
//! forecast is ever displayed.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod sequencer;
pub mod view;
pub mod weather;
pub mod widget;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::AppConfig;
pub use error::WeatherError;
pub use models::{DailyForecast, GeocodedLocation, ResolvedForecast};
pub use presentation::{TemperatureRange, WeatherIcon, country_flag, weather_icon, weekday_label};
pub use sequencer::{FetchOutcome, FetchRequest, FetchSequencer, resolve_and_fetch};
pub use weather::WeatherSource;
pub use widget::{Widget, WidgetState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
