//! Forecast analysis pipeline
//!
//! Wires the two concurrent stages and the selector together:
//! fetch (async I/O, high fan-out) → aggregate (blocking threads, one per
//! core) → select. Every city is processed independently; a failing city is
//! logged, recorded in the report and left out of the results.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, info, info_span, warn};

use crate::analysis::select_best;
use crate::config::FairdayConfig;
use crate::error::FairdayError;
use crate::models::ResultSet;
use crate::weather::ForecastSource;

pub mod aggregate;
pub mod fetch;

pub use aggregate::aggregate_all;
pub use fetch::fetch_all;

/// Pipeline stage a city was dropped in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Aggregate => write!(f, "aggregate"),
        }
    }
}

/// A city left out of the results and the reason why
#[derive(Debug)]
pub struct CityFailure {
    pub city: String,
    pub stage: Stage,
    pub error: FairdayError,
}

impl CityFailure {
    #[must_use]
    pub fn new(city: String, stage: Stage, error: FairdayError) -> Self {
        Self { city, stage, error }
    }
}

/// Outcome of the selection step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Cities sharing the best score, sorted by name
    Best(Vec<String>),
    /// No city made it through both stages
    NoResults,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Best(cities) => {
                write!(f, "The best city/cities is/are: [{}]", cities.join(", "))
            }
            Selection::NoResults => write!(f, "No cities to analyse. Exit"),
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub results: ResultSet,
    pub failures: Vec<CityFailure>,
}

impl PipelineReport {
    /// Run the selector over the results
    #[must_use]
    pub fn selection(&self) -> Selection {
        if self.results.is_empty() {
            Selection::NoResults
        } else {
            Selection::Best(select_best(&self.results))
        }
    }
}

/// Timeout and worker pool sizes of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Per-city fetch deadline
    pub timeout: Duration,
    pub fetch_workers: usize,
    pub aggregate_workers: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&FairdayConfig::default())
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_config(config: &FairdayConfig) -> Self {
        Self {
            timeout: config.source.timeout(),
            fetch_workers: config.pipeline.fetch_workers,
            aggregate_workers: config.pipeline.resolved_aggregate_workers(),
        }
    }
}

/// Lower-case, trim and deduplicate requested city names
pub fn normalize_cities<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The forecast analysis pipeline
pub struct Pipeline {
    source: Arc<dyn ForecastSource>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(source: Arc<dyn ForecastSource>, options: PipelineOptions) -> Self {
        Self { source, options }
    }

    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Fetch, aggregate and collect the forecasts of `cities`.
    ///
    /// City names are normalized first. Only cities that succeed in both
    /// stages appear in the report's results; the rest are in `failures`.
    pub async fn run<S: AsRef<str>>(&self, cities: &[S]) -> PipelineReport {
        let cities = normalize_cities(cities);
        let span = info_span!("pipeline_run", cities = cities.len());
        self.run_normalized(cities).instrument(span).await
    }

    async fn run_normalized(&self, cities: Vec<String>) -> PipelineReport {
        info!("Fetching forecasts for {} cities", cities.len());
        let (mut forecasts, mut failures) = fetch_all(
            &*self.source,
            &cities,
            self.options.timeout,
            self.options.fetch_workers,
        )
        .await;

        forecasts.retain(|city, forecast| {
            if forecast.is_empty() {
                warn!(city = %city, "No forecasts for the city");
            }
            !forecast.is_empty()
        });

        info!("Aggregating forecasts for {} cities", forecasts.len());
        let (results, aggregate_failures) =
            aggregate_all(forecasts, self.options.aggregate_workers).await;
        failures.extend(aggregate_failures);

        info!(
            succeeded = results.len(),
            failed = failures.len(),
            "Pipeline finished"
        );
        PipelineReport { results, failures }
    }
}
