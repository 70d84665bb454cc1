//! Fetch stage: concurrent, failure-isolated forecast downloads

use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::{CityFailure, Stage};
use crate::error::FairdayError;
use crate::models::RawForecast;
use crate::weather::ForecastSource;

/// Download the forecast of every city, at most `workers` at a time.
///
/// Each call is bounded by `timeout`. Cities whose call fails are logged and
/// reported in the returned failure list; they never affect other cities.
/// Results are collected in completion order.
pub async fn fetch_all<S>(
    source: &S,
    cities: &[String],
    timeout: Duration,
    workers: usize,
) -> (HashMap<String, RawForecast>, Vec<CityFailure>)
where
    S: ForecastSource + ?Sized,
{
    let mut forecasts = HashMap::with_capacity(cities.len());
    let mut failures = Vec::new();

    let mut completed = stream::iter(cities)
        .map(|city| async move { (city, fetch_one(source, city, timeout).await) })
        .buffer_unordered(workers.max(1));

    while let Some((city, result)) = completed.next().await {
        match result {
            Ok(forecast) => {
                debug!(city = %city, days = forecast.len(), "Fetched forecast");
                forecasts.insert(city.clone(), forecast);
            }
            Err(error) => {
                warn!(city = %city, "Cannot request data for the city: {}", error);
                failures.push(CityFailure::new(city.clone(), Stage::Fetch, error));
            }
        }
    }

    (forecasts, failures)
}

async fn fetch_one<S>(source: &S, city: &str, timeout: Duration) -> Result<RawForecast, FairdayError>
where
    S: ForecastSource + ?Sized,
{
    match tokio::time::timeout(timeout, source.fetch(city, timeout)).await {
        Ok(result) => result,
        Err(_) => Err(FairdayError::Timeout {
            city: city.to_string(),
            timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{FakeSource, day_json};

    #[tokio::test]
    async fn test_failure_does_not_affect_other_cities() {
        let source = FakeSource::default()
            .with_forecast("paris", vec![day_json("2022-05-26", &[(10, Some(12.0), "clear")])])
            .with_error("moscow");

        let cities = vec!["moscow".to_string(), "paris".to_string()];
        let (forecasts, failures) = fetch_all(&source, &cities, Duration::from_secs(1), 4).await;

        assert_eq!(forecasts.keys().collect::<Vec<_>>(), vec!["paris"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].city, "moscow");
        assert_eq!(failures[0].stage, Stage::Fetch);
    }

    #[tokio::test]
    async fn test_slow_city_times_out_without_blocking_others() {
        let source = FakeSource::default()
            .with_delay("london", Duration::from_secs(30))
            .with_forecast("berlin", vec![]);

        let cities = vec!["london".to_string(), "berlin".to_string()];
        let started = std::time::Instant::now();
        let (forecasts, failures) =
            fetch_all(&source, &cities, Duration::from_millis(100), 4).await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(forecasts.contains_key("berlin"));
        assert!(matches!(
            failures[0].error,
            FairdayError::Timeout { timeout, .. } if timeout == Duration::from_millis(100)
        ));
        assert!(failures[0].error.to_string().contains("100ms"));
    }

    #[tokio::test]
    async fn test_single_worker_still_fetches_everything() {
        let source = FakeSource::default()
            .with_forecast("roma", vec![])
            .with_forecast("cairo", vec![])
            .with_forecast("kazan", vec![]);

        let cities = vec!["roma".to_string(), "cairo".to_string(), "kazan".to_string()];
        let (forecasts, failures) = fetch_all(&source, &cities, Duration::from_secs(1), 0).await;

        assert_eq!(forecasts.len(), 3);
        assert!(failures.is_empty());
    }
}
