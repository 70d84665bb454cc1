//! Aggregate stage: parallel, failure-isolated forecast analysis

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use super::{CityFailure, Stage};
use crate::analysis::aggregate_forecast;
use crate::error::FairdayError;
use crate::models::{CityResult, RawForecast, ResultSet};

/// Filter and aggregate every city's forecast on blocking worker threads.
///
/// At most `workers` cities are analysed at the same time. A city whose
/// analysis fails is logged and reported; the others are unaffected.
pub async fn aggregate_all(
    forecasts: HashMap<String, RawForecast>,
    workers: usize,
) -> (ResultSet, Vec<CityFailure>) {
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();
    let pending: BTreeSet<String> = forecasts.keys().cloned().collect();

    for (city, forecast) in forecasts {
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // the semaphore is never closed
            let _permit = permits.acquire_owned().await;
            let worker_city = city.clone();
            let analysed = tokio::task::spawn_blocking(move || {
                aggregate_forecast(&forecast).map(|days| CityResult::new(worker_city, days))
            })
            .await
            .unwrap_or_else(|e| Err(FairdayError::aggregation(format!("worker failed: {e}"))));
            (city, analysed)
        });
    }

    collect_analysed(tasks, pending).await
}

type Analysed = (String, Result<CityResult, FairdayError>);

/// Drain `tasks` in completion order. Cities of `pending` that never report
/// back, because their task aborted, are recorded as failures.
async fn collect_analysed(
    mut tasks: JoinSet<Analysed>,
    mut pending: BTreeSet<String>,
) -> (ResultSet, Vec<CityFailure>) {
    let mut results = ResultSet::new();
    let mut failures = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((city, Ok(result))) => {
                debug!(city = %city, days = result.days.len(), "Aggregated forecast");
                pending.remove(&city);
                results.insert(city, result);
            }
            Ok((city, Err(err))) => {
                warn!(city = %city, "DataAggregationError: {}", err);
                pending.remove(&city);
                failures.push(CityFailure::new(city, Stage::Aggregate, err));
            }
            Err(e) => error!("Aggregation task aborted: {}", e),
        }
    }

    failures.extend(pending.into_iter().map(|city| {
        warn!(city = %city, "DataAggregationError: aggregation task aborted");
        let err = FairdayError::aggregation(format!("aggregation of {city:?} was aborted"));
        CityFailure::new(city, Stage::Aggregate, err)
    }));

    (results, failures)
}
