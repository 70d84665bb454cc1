//! Forecast sources
//!
//! The pipeline only depends on [`ForecastSource`]; the HTTP provider and
//! its static city table live in the submodules.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FairdayError;
use crate::models::RawForecast;

pub mod cities;
pub mod http;

pub use cities::{city_slug, known_cities};
pub use http::HttpForecastSource;

/// Anything that turns a city name into a raw forecast document
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the forecast of `city`, giving up after `timeout`
    async fn fetch(&self, city: &str, timeout: Duration) -> Result<RawForecast, FairdayError>;
}
