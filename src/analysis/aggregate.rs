//! Day aggregator: reduces filtered days to statistics

use chrono::NaiveDate;

use super::filter::filter_forecast;
use crate::error::FairdayError;
use crate::models::{DayRecord, DayStats, RawForecast};

/// Reduce one filtered day to its statistics.
///
/// The average divides the sum of known temperatures by the number of
/// qualifying hours, so hours without a temperature pull it towards zero.
/// It is `None` only when no hour has a temperature at all.
pub fn aggregate_day(mut day: DayRecord) -> Result<DayStats, FairdayError> {
    let date = parse_date(&day.date)?;
    day.sort_hours();

    let (Some(first), Some(last)) = (day.hours.first(), day.hours.last()) else {
        return Ok(DayStats::empty(Some(date)));
    };

    let count = day.hours.len();
    let known: Vec<f64> = day.hours.iter().filter_map(|h| h.temperature).collect();
    let temp_avg = if known.is_empty() {
        None
    } else {
        Some(round3(known.iter().sum::<f64>() / count as f64))
    };

    Ok(DayStats {
        date: Some(date),
        hours_start: Some(first.hour),
        hours_end: Some(last.hour),
        hours_count: Some(count),
        temp_avg,
        relevant_cond_hours: count,
    })
}

/// Filter and aggregate a whole forecast; the first bad day fails the city
pub fn aggregate_forecast(forecast: &RawForecast) -> Result<Vec<DayStats>, FairdayError> {
    filter_forecast(forecast)
        .into_iter()
        .map(aggregate_day)
        .collect()
}

fn parse_date(text: &str) -> Result<NaiveDate, FairdayError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| FairdayError::MalformedDate {
        date: text.to_string(),
        reason: e.to_string(),
    })
}

/// Round to 3 decimals on the exact decimal expansion of `value`
fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}
