//! Widget controller: owns the UI state and the trigger generation
//!
//! Every trigger (query change or explicit refresh) bumps the generation and
//! hands back a [`FetchRequest`] carrying it. Outcomes are only committed
//! when their generation is still the current one, so a slow answer for an
//! older query can never overwrite a newer one.

use crate::WeatherError;
use crate::models::ResolvedForecast;
use crate::sequencer::{FetchOutcome, FetchRequest, run_sequence};
use crate::weather::WeatherSource;
use tracing::debug;

/// Everything the view renders
#[derive(Debug, Default)]
pub struct WidgetState {
    /// Current contents of the search input
    pub location_query: String,
    /// True while a sequence for `location_query` is outstanding
    pub is_loading: bool,
    /// Resolved name and flag of the last successful sequence
    pub display_label: String,
    /// Forecast for the current query, once one has arrived
    pub forecast: Option<ResolvedForecast>,
    /// Failure of the last sequence for the current query
    pub error: Option<WeatherError>,
}

#[derive(Debug, Default)]
pub struct Widget {
    state: WidgetState,
    generation: u64,
}

impl Widget {
    #[must_use]
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            state: WidgetState {
                location_query: initial_query.into(),
                ..WidgetState::default()
            },
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Input controller: replace the query. A changed query invalidates the
    /// displayed forecast and starts a new sequence; an unchanged one is a
    /// no-op.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<FetchRequest> {
        let query = query.into();
        if query == self.state.location_query {
            return None;
        }

        self.state.location_query = query;
        self.state.forecast = None;
        self.state.display_label.clear();
        Some(self.trigger())
    }

    /// Explicit "Get Weather": re-run the current query
    pub fn trigger(&mut self) -> FetchRequest {
        self.generation += 1;
        self.state.is_loading = true;
        self.state.error = None;
        debug!(
            generation = self.generation,
            query = %self.state.location_query,
            "Fetch triggered"
        );

        FetchRequest {
            generation: self.generation,
            query: self.state.location_query.clone(),
        }
    }

    /// Commit an outcome if it belongs to the latest trigger. Returns whether
    /// the state changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                query = %outcome.query,
                "Discarding stale fetch outcome"
            );
            return false;
        }

        self.state.is_loading = false;
        match outcome.result {
            Ok(forecast) => {
                self.state.display_label = forecast.display_label.clone();
                self.state.forecast = Some(forecast);
                self.state.error = None;
            }
            Err(e) => {
                self.state.display_label.clear();
                self.state.forecast = None;
                self.state.error = Some(e);
            }
        }
        true
    }

    /// Trigger and await a sequence inline, without a background task
    pub async fn fetch_now(&mut self, source: &dyn WeatherSource) -> bool {
        let request = self.trigger();
        let outcome = run_sequence(source, request).await;
        self.apply(outcome)
    }
}
