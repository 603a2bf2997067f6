//! Geocode-then-forecast fetch sequence
//!
//! [`resolve_and_fetch`] is the two-step chain itself. [`FetchSequencer`]
//! runs it on the tokio runtime, one in-flight task at a time, and reports
//! every outcome back over a channel tagged with the generation of the
//! trigger that started it. Deciding whether an outcome is still current is
//! the widget's job.

use crate::models::{GeocodedLocation, ResolvedForecast};
use crate::presentation::country_flag;
use crate::weather::WeatherSource;
use crate::{Result, WeatherError};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Resolve `query` to a place, then fetch its daily forecast.
///
/// The two calls are strictly ordered; the forecast needs the geocoding
/// output. An empty query is reported as not found without a network call.
pub async fn resolve_and_fetch(source: &dyn WeatherSource, query: &str) -> Result<ResolvedForecast> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::location_not_found(query));
    }

    let location = source
        .geocode(trimmed)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::location_not_found(trimmed))?;

    debug!(
        "Found location: {} ({:.4}, {:.4}) tz={}",
        location.name, location.latitude, location.longitude, location.timezone
    );

    let display_label = display_label(&location);
    let days = source.daily_forecast(&location).await?;

    Ok(ResolvedForecast {
        location,
        display_label,
        days,
    })
}

/// Resolved name followed by the country flag. A missing or invalid country
/// code leaves just the name.
#[must_use]
pub fn display_label(location: &GeocodedLocation) -> String {
    match location.country_code.as_deref().map(country_flag) {
        Some(Ok(flag)) => format!("{} {}", location.name, flag),
        Some(Err(e)) => {
            warn!("Dropping flag for {}: {}", location.name, e);
            location.name.clone()
        }
        None => location.name.clone(),
    }
}

/// A fetch the widget asked for, tagged with its trigger generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: String,
}

impl FetchRequest {
    #[must_use]
    pub fn complete(self, result: Result<ResolvedForecast>) -> FetchOutcome {
        FetchOutcome {
            generation: self.generation,
            query: self.query,
            result,
        }
    }
}

/// Result of one fetch sequence, delivered back to the widget
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub query: String,
    pub result: Result<ResolvedForecast>,
}

/// Run one sequence for `request`, logging failures at this boundary
pub async fn run_sequence(source: &dyn WeatherSource, request: FetchRequest) -> FetchOutcome {
    let result = resolve_and_fetch(source, &request.query).await;
    match &result {
        Ok(forecast) => info!(
            "Forecast ready for {} ({} days)",
            forecast.display_label,
            forecast.days.len()
        ),
        Err(e @ WeatherError::LocationNotFound { .. }) => warn!("{}", e),
        Err(e) => error!("Fetch sequence for '{}' failed: {}", request.query, e),
    }
    request.complete(result)
}

/// Reports completion exactly once. Dropping it unreported (abort, panic)
/// still sends a failure so the loading flag can never stick.
struct CompletionGuard {
    tx: Option<UnboundedSender<FetchOutcome>>,
    request: FetchRequest,
}

impl CompletionGuard {
    fn report(mut self, outcome: FetchOutcome) {
        if let Some(tx) = self.tx.take() {
            // Receiver gone means the widget shut down.
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            debug!(
                generation = self.request.generation,
                "Fetch sequence ended without a result"
            );
            let outcome = self
                .request
                .clone()
                .complete(Err(WeatherError::forecast("fetch sequence was interrupted")));
            let _ = tx.send(outcome);
        }
    }
}

/// Spawns fetch sequences, keeping at most one in flight
pub struct FetchSequencer {
    source: Arc<dyn WeatherSource>,
    tx: UnboundedSender<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl FetchSequencer {
    pub fn new(source: Arc<dyn WeatherSource>, tx: UnboundedSender<FetchOutcome>) -> Self {
        Self {
            source,
            tx,
            in_flight: None,
        }
    }

    /// Start a sequence for `request`, aborting the previous one if it is
    /// still running. Must be called from within a tokio runtime.
    pub fn start(&mut self, request: FetchRequest) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                debug!("Superseding in-flight fetch sequence");
                previous.abort();
            }
        }

        let span = info_span!("fetch_sequence", generation = request.generation, query = %request.query);
        let source = Arc::clone(&self.source);
        let guard = CompletionGuard {
            tx: Some(self.tx.clone()),
            request: request.clone(),
        };

        let handle = tokio::spawn(
            async move {
                let outcome = run_sequence(source.as_ref(), request).await;
                guard.report(outcome);
            }
            .instrument(span),
        );
        self.in_flight = Some(handle);
    }
}

impl Drop for FetchSequencer {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
