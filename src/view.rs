//! Text rendering of the widget state

use crate::models::{DailyForecast, ResolvedForecast};
use crate::presentation::{TemperatureRange, weather_icon, weekday_label};
use crate::widget::WidgetState;
use tracing::debug;

pub const TITLE: &str = "CLASSY WEATHER";
pub const LOADING_LINE: &str = "Loading...";

/// Render the whole widget. Pure function of `state`.
#[must_use]
pub fn render(state: &WidgetState) -> String {
    let mut out = format!("{TITLE}\n\n");
    out.push_str(&format!("Search from location: {}\n", state.location_query));
    out.push_str("[Enter] Get Weather  |  type a new place to search  |  exit\n");

    if state.is_loading {
        out.push_str(&format!("{LOADING_LINE}\n"));
    }

    if let Some(error) = &state.error {
        out.push_str(&format!("! {}\n", error.user_message()));
    }

    if let Some(forecast) = &state.forecast {
        out.push_str(&render_forecast(&state.display_label, forecast));
    }

    out
}

/// Header plus one line per day
#[must_use]
pub fn render_forecast(display_label: &str, forecast: &ResolvedForecast) -> String {
    let mut out = format!("\nWeather {display_label}\n");
    for (day, is_today) in forecast.days_with_today() {
        out.push_str(&format!("  {}\n", render_day(day, is_today)));
    }
    out
}

/// Icon, weekday label and rounded temperature range for one day
#[must_use]
pub fn render_day(day: &DailyForecast, is_today: bool) -> String {
    let icon = weather_icon(day.weather_code);
    if !icon.is_recognized() {
        debug!(code = day.weather_code, date = %day.date, "Unrecognized weather code");
    }
    format!(
        "{}  {:<5}  {}",
        icon,
        weekday_label(day.date, is_today),
        TemperatureRange::from_celsius(day.temp_min, day.temp_max)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherError;
    use crate::models::GeocodedLocation;
    use crate::presentation::WeatherIcon;
    use chrono::NaiveDate;

    fn day(date: (i32, u32, u32), code: i32, min: f64, max: f64) -> DailyForecast {
        DailyForecast {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            weather_code: code,
            temp_max: max,
            temp_min: min,
        }
    }

    fn london_forecast() -> ResolvedForecast {
        ResolvedForecast {
            location: GeocodedLocation::new(51.5, -0.12, "Europe/London".into(), "London".into())
                .with_country_code("GB"),
            display_label: "London 🇬🇧".into(),
            days: vec![
                day((2024, 3, 1), 61, 3.7, 9.2),
                day((2024, 3, 2), 3, 4.1, 11.0),
                day((2024, 3, 3), 42, 5.0, 12.5),
            ],
        }
    }

    #[test]
    fn test_today_entry_shows_light_rain_and_today() {
        let line = render_day(&day((2024, 3, 1), 61, 3.7, 9.2), true);
        assert!(line.starts_with("🌦"));
        assert!(line.contains("Today"));
        assert!(!line.contains("Fri"));
        assert!(line.ends_with("3° — 10°"));
    }

    #[test]
    fn test_later_days_use_weekday_names() {
        let rendered = render_forecast("London 🇬🇧", &london_forecast());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "Weather London 🇬🇧");
        assert!(lines[2].contains("Today"));
        assert!(lines[3].contains("Sat"));
        assert!(lines[3].contains("4° — 11°"));
        assert!(lines[4].starts_with("  NOT FOUND"));
        assert!(lines[4].contains("Sun"));
    }

    #[test]
    fn test_loading_indicator_only_while_loading() {
        let mut state = WidgetState {
            location_query: "London".into(),
            ..WidgetState::default()
        };
        assert!(!render(&state).contains(LOADING_LINE));

        state.is_loading = true;
        let rendered = render(&state);
        assert!(rendered.contains(LOADING_LINE));
        assert!(rendered.contains("Search from location: London"));
    }

    #[test]
    fn test_forecast_rendered_only_when_present() {
        let mut state = WidgetState {
            location_query: "London".into(),
            ..WidgetState::default()
        };
        assert!(!render(&state).contains("Weather London"));

        state.display_label = "London 🇬🇧".into();
        state.forecast = Some(london_forecast());
        let rendered = render(&state);
        assert!(rendered.contains("Weather London 🇬🇧"));
        assert!(rendered.starts_with(TITLE));
    }

    #[test]
    fn test_error_line_is_user_facing() {
        let state = WidgetState {
            location_query: "Lundon".into(),
            error: Some(WeatherError::location_not_found("Lundon")),
            ..WidgetState::default()
        };
        let rendered = render(&state);
        assert!(rendered.contains("! No place called \"Lundon\""));
        assert!(!rendered.contains("\nWeather "));
    }

    #[test]
    fn test_render_full_layout() {
        let state = WidgetState {
            location_query: "London".into(),
            is_loading: true,
            display_label: "London 🇬🇧".into(),
            forecast: Some(london_forecast()),
            ..WidgetState::default()
        };

        let lines: Vec<String> = render(&state).lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                TITLE.to_string(),
                String::new(),
                "Search from location: London".to_string(),
                "[Enter] Get Weather  |  type a new place to search  |  exit".to_string(),
                LOADING_LINE.to_string(),
                String::new(),
                "Weather London 🇬🇧".to_string(),
                format!("  {}  {:<5}  3° — 10°", WeatherIcon::LightRain.glyph(), "Today"),
                format!("  {}  {:<5}  4° — 11°", WeatherIcon::Overcast.glyph(), "Sat"),
                format!("  NOT FOUND  {:<5}  5° — 13°", "Sun"),
            ]
        );
    }
}
