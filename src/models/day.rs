//! Filtered per-day hourly records

use serde::{Deserialize, Serialize};

/// One hour that passed the workable-window and condition filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Temperature in Celsius, unknown when the provider sent none
    pub temperature: Option<f64>,
    /// Provider condition label (e.g. "partly-cloudy")
    pub condition: String,
}

impl HourRecord {
    #[must_use]
    pub fn new(hour: u8, temperature: Option<f64>, condition: impl Into<String>) -> Self {
        Self {
            hour,
            temperature,
            condition: condition.into(),
        }
    }
}

/// Qualifying hours of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Date as sent by the provider; parsed during aggregation
    pub date: String,
    pub hours: Vec<HourRecord>,
}

impl DayRecord {
    #[must_use]
    pub fn new(date: impl Into<String>, hours: Vec<HourRecord>) -> Self {
        Self {
            date: date.into(),
            hours,
        }
    }

    /// Sort hours ascending; stable, so equal hours keep provider order
    pub fn sort_hours(&mut self) {
        self.hours.sort_by_key(|h| h.hour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_hours_is_stable() {
        let mut day = DayRecord::new(
            "2022-05-13",
            vec![
                HourRecord::new(12, Some(2.0), "clear"),
                HourRecord::new(9, Some(4.0), "cloudy"),
                HourRecord::new(12, None, "overcast"),
            ],
        );
        day.sort_hours();

        let order: Vec<_> = day.hours.iter().map(|h| (h.hour, h.condition.as_str())).collect();
        assert_eq!(order, vec![(9, "cloudy"), (12, "clear"), (12, "overcast")]);
    }
}
