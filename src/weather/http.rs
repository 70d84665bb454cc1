//! HTTP forecast provider
//!
//! Resolves a city through the static table, downloads its forecast
//! document and extracts the `forecasts` list. Transient failures are
//! retried with exponential backoff before the city is given up.

use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use tracing::{debug, instrument};

use super::ForecastSource;
use super::cities::{city_slug, known_cities};
use crate::config::SourceConfig;
use crate::error::FairdayError;
use crate::models::RawForecast;

/// Forecast source backed by the provider's HTTP endpoint
#[derive(Clone)]
pub struct HttpForecastSource {
    client: ClientWithMiddleware,
    base_url: String,
}

impl HttpForecastSource {
    /// Create a source from the `[source]` configuration section
    pub fn new(config: &SourceConfig) -> Result<Self, FairdayError> {
        let policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        Self::build(&config.base_url, policy)
    }

    fn build(base_url: &str, policy: ExponentialBackoff) -> Result<Self, FairdayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fairday/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FairdayError::config(format!("Failed to create HTTP client: {e}")))?;

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(policy))
            .build();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Document URL for `city`, `None` for cities the provider does not know
    #[must_use]
    pub fn url_for(&self, city: &str) -> Option<String> {
        city_slug(city).map(|slug| format!("{}/{slug}-response.json", self.base_url))
    }
}

#[async_trait]
impl ForecastSource for HttpForecastSource {
    #[instrument(skip(self))]
    async fn fetch(&self, city: &str, timeout: Duration) -> Result<RawForecast, FairdayError> {
        let url = self
            .url_for(city)
            .ok_or_else(|| {
                let known: Vec<String> = known_cities().collect();
                FairdayError::unavailable(city, format!("unknown city, expected one of: {}", known.join(", ")))
            })?;
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FairdayError::unavailable(city, format!("request for {url:?} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FairdayError::unavailable(
                city,
                format!("the request for {url:?} has failed: status={status} is not OK"),
            ));
        }

        let document: Value = response.json().await.map_err(|e| {
            FairdayError::unavailable(city, format!("invalid JSON from {url:?}: {e}"))
        })?;

        let forecast = RawForecast::from_document(city, document)?;
        debug!("Received {} forecast days", forecast.len());
        Ok(forecast)
    }
}
