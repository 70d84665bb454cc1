//! Day filter: keeps the workable daytime hours with acceptable weather

use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::trace;

use crate::models::forecast::parse_temperature;
use crate::models::{DayRecord, HourRecord, RawDay, RawForecast, RawHour};

/// Hours of the day considered workable
pub const WORKABLE_HOURS: RangeInclusive<i64> = 9..=19;

/// Condition labels without precipitation
pub const ACCEPTABLE_CONDITIONS: [&str; 4] = ["clear", "partly-cloudy", "cloudy", "overcast"];

#[must_use]
pub fn is_acceptable_condition(condition: &str) -> bool {
    ACCEPTABLE_CONDITIONS.contains(&condition)
}

/// Filter one raw day entry.
///
/// Returns `None` when the entry has no date or no hours. Hours that are
/// malformed, outside [`WORKABLE_HOURS`] or with an unacceptable condition
/// are left out; the remaining ones keep their provider order.
#[must_use]
pub fn filter_day(raw_day: RawDay<'_>) -> Option<DayRecord> {
    let date = date_text(raw_day.date()?);
    let hours = raw_day.hours().filter(|hours| !hours.is_empty())?;

    let hours = hours
        .iter()
        .map(RawHour::new)
        .filter_map(filter_hour)
        .collect();

    Some(DayRecord::new(date, hours))
}

/// Filter every day entry of a forecast
#[must_use]
pub fn filter_forecast(forecast: &RawForecast) -> Vec<DayRecord> {
    forecast.days().filter_map(filter_day).collect()
}

fn filter_hour(raw: RawHour<'_>) -> Option<HourRecord> {
    let Some(hour) = raw.hour() else {
        trace!("Dropping hour entry without a numeric hour");
        return None;
    };
    if !WORKABLE_HOURS.contains(&hour) {
        return None;
    }

    let Some(condition) = raw.condition() else {
        trace!(hour, "Dropping hour entry without a condition");
        return None;
    };
    if !is_acceptable_condition(condition) {
        return None;
    }

    let temperature = match raw.temperature() {
        None => None,
        Some(value) => match parse_temperature(value) {
            Some(temp) => Some(temp),
            None => {
                trace!(hour, "Dropping hour entry with a malformed temperature");
                return None;
            }
        },
    };

    // the window guarantees the hour fits into a u8
    let hour = u8::try_from(hour).ok()?;
    Some(HourRecord::new(hour, temperature, condition))
}

fn date_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn forecast(days: Value) -> RawForecast {
        serde_json::from_value(days).unwrap()
    }

    #[rstest]
    #[case(json!([{}]))]
    #[case(json!([{"date": null, "hours": null}]))]
    #[case(json!([{"date": null, "hours": [{"hour": "10", "temp": 6.3, "condition": "lolo"}]}]))]
    #[case(json!([{"date": "2022-05-13", "hours": []}]))]
    #[case(json!([{"date": "2022-05-13"}]))]
    fn test_incomplete_days_are_skipped(#[case] days: Value) {
        assert!(filter_forecast(&forecast(days)).is_empty());
    }

    #[test]
    fn test_selects_window_and_conditions() {
        let days = filter_forecast(&forecast(json!([{
            "date": "2022-05-13",
            "hours": [
                {"hour": "20", "temp": "4.1", "condition": "nonono"},
                {"hour": "12", "temp": 9.2, "condition": "clear"},
                {"hour": "9", "temp": "12.6", "condition": "partly-cloudy"},
                {"hour": "7", "temp": "4.1", "condition": "nonono"}
            ]
        }])));

        assert_eq!(
            days,
            vec![DayRecord::new(
                "2022-05-13",
                vec![
                    HourRecord::new(12, Some(9.2), "clear"),
                    HourRecord::new(9, Some(12.6), "partly-cloudy"),
                ]
            )]
        );
    }

    #[rstest]
    #[case(json!({"hour": "8", "temp": 20, "condition": "clear"}))]
    #[case(json!({"hour": "20", "temp": 20, "condition": "clear"}))]
    #[case(json!({"hour": "-1", "temp": 20, "condition": "clear"}))]
    #[case(json!({"hour": "12", "temp": 20, "condition": "rain"}))]
    #[case(json!({"hour": "12", "temp": 20, "condition": "thunderstorm-with-hail"}))]
    fn test_hour_excluded_regardless_of_temperature(#[case] hour: Value) {
        assert_eq!(filter_hour(RawHour::new(&hour)), None);
    }

    #[rstest]
    #[case(json!({"hour": "noon", "temp": 20, "condition": "clear"}))]
    #[case(json!({"hour": "12", "temp": 20}))]
    #[case(json!({"hour": "12", "temp": "warm", "condition": "clear"}))]
    #[case(json!({"hour": "12", "temp": "NaN", "condition": "clear"}))]
    #[case(json!({"hour": "12", "temp": "inf", "condition": "clear"}))]
    #[case(json!("12"))]
    fn test_malformed_hour_is_dropped_not_the_day(#[case] bad: Value) {
        let days = filter_forecast(&forecast(json!([{
            "date": "2022-05-13",
            "hours": [bad, {"hour": 10, "temp": 3, "condition": "cloudy"}]
        }])));

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].hours, vec![HourRecord::new(10, Some(3.0), "cloudy")]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let days = filter_forecast(&forecast(json!([{
            "date": "2022-05-13",
            "hours": [
                {"hour": 9, "temp": 1, "condition": "overcast"},
                {"hour": 19, "temp": 2, "condition": "overcast"}
            ]
        }])));
        let hours: Vec<u8> = days[0].hours.iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![9, 19]);
    }

    #[test]
    fn test_day_without_qualifying_hours_is_kept_empty() {
        let days = filter_forecast(&forecast(json!([{
            "date": "2022-05-13",
            "hours": [{"hour": "3", "temp": 1, "condition": "clear"}]
        }])));
        assert_eq!(days, vec![DayRecord::new("2022-05-13", vec![])]);
    }

    #[test]
    fn test_null_temperature_is_kept_unknown() {
        let days = filter_forecast(&forecast(json!([{
            "date": "2024-08-09",
            "hours": [{"hour": "10", "temp": null, "condition": "cloudy"}]
        }])));
        assert_eq!(days[0].hours, vec![HourRecord::new(10, None, "cloudy")]);
    }
}
