//! `fairday` - find the city with the most favourable weather
//!
//! This library fetches multi-day forecasts for a set of cities, keeps the
//! workable daytime hours with acceptable conditions, computes per-day
//! statistics and selects the city (or cities) with the best combined score.

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod weather;

// Re-export core types for public API
pub use crate::config::FairdayConfig;
pub use error::FairdayError;
pub use models::{CityResult, DayStats, RawForecast, ResultSet, Score};
pub use output::{OutputTarget, write_results};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport, Selection, normalize_cities};
pub use weather::{ForecastSource, HttpForecastSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FairdayError>;
