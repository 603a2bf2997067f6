//! Pure display mappings: weather codes to icons, country codes to flags,
//! dates to weekday labels and temperatures to a rounded range.

use crate::{Result, WeatherError};
use chrono::NaiveDate;
use std::fmt;

/// Offset from an ASCII uppercase letter to its regional indicator symbol
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

pub const TODAY_LABEL: &str = "Today";

/// Glyph shown for a weather code outside every known bucket
pub const UNRECOGNIZED_GLYPH: &str = "NOT FOUND";

/// Icon buckets for WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Clear,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    LightRain,
    Rain,
    Snow,
    Thunderstorm,
    SevereThunderstorm,
    /// Code matched no bucket; carried along for logging
    Unrecognized(i32),
}

impl WeatherIcon {
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤",
            Self::PartlyCloudy => "⛅️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫",
            Self::LightRain => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Thunderstorm => "🌩",
            Self::SevereThunderstorm => "⛈",
            Self::Unrecognized(_) => UNRECOGNIZED_GLYPH,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Map a WMO weather code to its icon bucket
#[must_use]
pub fn weather_icon(code: i32) -> WeatherIcon {
    match code {
        0 => WeatherIcon::Clear,
        1 => WeatherIcon::MostlyClear,
        2 => WeatherIcon::PartlyCloudy,
        3 => WeatherIcon::Overcast,
        45 | 48 => WeatherIcon::Fog,
        51 | 56 | 61 | 66 | 80 => WeatherIcon::LightRain,
        53 | 55 | 57 | 63 | 65 | 67 | 81 | 82 => WeatherIcon::Rain,
        71 | 73 | 75 | 77 | 85 | 86 => WeatherIcon::Snow,
        95 => WeatherIcon::Thunderstorm,
        96 | 99 => WeatherIcon::SevereThunderstorm,
        other => WeatherIcon::Unrecognized(other),
    }
}

/// Convert an ISO 3166-1 alpha-2 code into its regional indicator flag.
///
/// Input is upper-cased first. Anything other than exactly two ASCII letters
/// is rejected.
pub fn country_flag(iso_alpha2: &str) -> Result<String> {
    let code = iso_alpha2.to_ascii_uppercase();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(WeatherError::invalid_country_code(iso_alpha2));
    }

    code.chars()
        .map(|c| {
            char::from_u32(REGIONAL_INDICATOR_OFFSET + u32::from(c))
                .ok_or_else(|| WeatherError::invalid_country_code(iso_alpha2))
        })
        .collect()
}

/// "Today" for the first forecast day, else the short English weekday name
#[must_use]
pub fn weekday_label(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        TODAY_LABEL.to_string()
    } else {
        date.format("%a").to_string()
    }
}

/// Display-only temperature range: min floored, max ceiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureRange {
    pub min: i64,
    pub max: i64,
}

impl TemperatureRange {
    #[must_use]
    pub fn from_celsius(temp_min: f64, temp_max: f64) -> Self {
        Self {
            min: temp_min.floor() as i64,
            max: temp_max.ceil() as i64,
        }
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}° — {}°", self.min, self.max)
    }
}
