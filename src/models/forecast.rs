//! Raw provider forecast document
//!
//! The provider document is ingested leniently: every field may be absent,
//! `null` or of an unexpected type, so day and hour entries are kept as
//! untyped JSON and accessed through optional views.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FairdayError;

/// Forecast document for one city: the provider's `forecasts` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawForecast {
    days: Vec<Value>,
}

impl RawForecast {
    /// Wrap already extracted day entries
    #[must_use]
    pub fn new(days: Vec<Value>) -> Self {
        Self { days }
    }

    /// Extract the `forecasts` list from a full provider response
    pub fn from_document(city: &str, document: Value) -> Result<Self, FairdayError> {
        match document {
            Value::Object(mut map) => match map.remove("forecasts") {
                Some(Value::Array(days)) => Ok(Self::new(days)),
                Some(Value::Null) => Ok(Self::default()),
                _ => Err(FairdayError::MissingForecasts {
                    city: city.to_string(),
                }),
            },
            // an empty body carries no forecasts at all
            Value::Null => Ok(Self::default()),
            _ => Err(FairdayError::MissingForecasts {
                city: city.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Iterate over the day entries
    pub fn days(&self) -> impl Iterator<Item = RawDay<'_>> {
        self.days.iter().map(RawDay)
    }
}

/// Borrowed view of one raw day entry
#[derive(Debug, Clone, Copy)]
pub struct RawDay<'a>(&'a Value);

impl<'a> RawDay<'a> {
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// The date field, unless absent or `null`
    #[must_use]
    pub fn date(&self) -> Option<&'a Value> {
        self.0.get("date").filter(|v| !v.is_null())
    }

    /// The hour entries, unless absent, `null` or not a list
    #[must_use]
    pub fn hours(&self) -> Option<&'a [Value]> {
        self.0
            .get("hours")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// Borrowed view of one raw hour entry
#[derive(Debug, Clone, Copy)]
pub struct RawHour<'a>(&'a Value);

impl<'a> RawHour<'a> {
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// Hour of day, accepting JSON integers and numeric strings
    #[must_use]
    pub fn hour(&self) -> Option<i64> {
        match self.0.get("hour")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw temperature field, `None` when absent or `null`
    #[must_use]
    pub fn temperature(&self) -> Option<&'a Value> {
        self.0.get("temp").filter(|v| !v.is_null())
    }

    /// Condition label, `None` when absent or not a string
    #[must_use]
    pub fn condition(&self) -> Option<&'a str> {
        self.0.get("condition").and_then(Value::as_str)
    }
}

/// Parse a raw temperature value: JSON numbers and numeric strings.
///
/// Only finite values are temperatures; `"NaN"` or `"inf"` text is malformed.
#[must_use]
pub fn parse_temperature(value: &Value) -> Option<f64> {
    let temp = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    temp.filter(|t| t.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_from_document_extracts_forecasts() {
        let doc = json!({
            "info": {"geoid": 213},
            "forecasts": [{"date": "2022-05-26", "hours": []}]
        });
        let forecast = RawForecast::from_document("moscow", doc).unwrap();
        assert_eq!(forecast.len(), 1);
    }

    #[test]
    fn test_from_document_without_forecasts_key() {
        let err = RawForecast::from_document("moscow", json!({"info": {}})).unwrap_err();
        assert!(matches!(err, FairdayError::MissingForecasts { city } if city == "moscow"));
    }

    #[test]
    fn test_from_document_null_body_is_empty() {
        let forecast = RawForecast::from_document("moscow", Value::Null).unwrap();
        assert!(forecast.is_empty());
    }

    #[test]
    fn test_raw_day_lenient_access() {
        let empty = json!({});
        let day = RawDay::new(&empty);
        assert!(day.date().is_none());
        assert!(day.hours().is_none());

        let nulls = json!({"date": null, "hours": "not a list"});
        let day = RawDay::new(&nulls);
        assert!(day.date().is_none());
        assert!(day.hours().is_none());
    }

    #[rstest]
    #[case(json!({"hour": "10"}), Some(10))]
    #[case(json!({"hour": 7}), Some(7))]
    #[case(json!({"hour": " 9 "}), Some(9))]
    #[case(json!({"hour": "ten"}), None)]
    #[case(json!({"hour": 9.5}), None)]
    #[case(json!({}), None)]
    fn test_raw_hour_parsing(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(RawHour::new(&value).hour(), expected);
    }

    #[rstest]
    #[case(json!(4), Some(4.0))]
    #[case(json!("4.1"), Some(4.1))]
    #[case(json!(-2.5), Some(-2.5))]
    #[case(json!("warm"), None)]
    #[case(json!("NaN"), None)]
    #[case(json!("inf"), None)]
    #[case(json!("-infinity"), None)]
    #[case(json!(true), None)]
    fn test_parse_temperature(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(parse_temperature(&value), expected);
    }
}
