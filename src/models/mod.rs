//! Data models for the fairday pipeline
//!
//! This module contains the domain models organized by pipeline stage:
//! - Forecast: the raw, leniently typed provider document
//! - Day: hourly records that passed the day filter
//! - Stats: per-day statistics, per-city results and ranking scores

pub mod day;
pub mod forecast;
pub mod stats;

// Re-export all public types for convenient access
pub use day::{DayRecord, HourRecord};
pub use forecast::{RawDay, RawForecast, RawHour};
pub use stats::{CityResult, DayStats, ResultSet, Score};
