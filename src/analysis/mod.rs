//! Forecast analysis
//!
//! Pure, synchronous building blocks of the pipeline:
//! - Filter: workable-window and condition selection of hourly entries
//! - Aggregate: per-day statistics
//! - Selector: ranking of cities by their combined score

pub mod aggregate;
pub mod filter;
pub mod selector;

pub use aggregate::{aggregate_day, aggregate_forecast};
pub use filter::{ACCEPTABLE_CONDITIONS, WORKABLE_HOURS, filter_day, filter_forecast};
pub use selector::select_best;
