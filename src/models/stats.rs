//! Aggregated per-day and per-city statistics

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics for one forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub date: Option<NaiveDate>,
    /// First qualifying hour
    pub hours_start: Option<u8>,
    /// Last qualifying hour
    pub hours_end: Option<u8>,
    pub hours_count: Option<usize>,
    /// Mean temperature rounded to 3 decimals, `None` if no hour had one
    pub temp_avg: Option<f64>,
    /// Number of hours inside the window with an acceptable condition
    pub relevant_cond_hours: usize,
}

impl DayStats {
    /// Stats for a day where no hour qualified
    #[must_use]
    pub fn empty(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            hours_start: None,
            hours_end: None,
            hours_count: None,
            temp_avg: None,
            relevant_cond_hours: 0,
        }
    }

    /// Whether this day contributes to a city's [`Score`]
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.temp_avg.is_some() && self.relevant_cond_hours > 0
    }
}

/// Aggregated forecast of one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityResult {
    /// City name; the map key in the serialized artifact
    #[serde(skip)]
    pub city: String,
    pub days: Vec<DayStats>,
}

impl CityResult {
    #[must_use]
    pub fn new(city: impl Into<String>, days: Vec<DayStats>) -> Self {
        Self {
            city: city.into(),
            days,
        }
    }

    /// Sum of scored daily averages and their relevant hours
    #[must_use]
    pub fn score(&self) -> Score {
        self.days
            .iter()
            .filter(|d| d.is_scored())
            .fold(Score::default(), |acc, d| Score {
                total_temp: acc.total_temp + d.temp_avg.unwrap_or_default(),
                total_hours: acc.total_hours + d.relevant_cond_hours,
            })
    }
}

/// Successfully aggregated cities keyed by name
pub type ResultSet = BTreeMap<String, CityResult>;

/// Ranking key of a city: total temperature first, then total hours
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
    pub total_temp: f64,
    pub total_hours: usize,
}

impl Score {
    #[must_use]
    pub fn new(total_temp: f64, total_hours: usize) -> Self {
        Self {
            total_temp,
            total_hours,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_temp
            .total_cmp(&other.total_temp)
            .then(self.total_hours.cmp(&other.total_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(temp_avg: Option<f64>, hours: usize) -> DayStats {
        DayStats {
            date: NaiveDate::from_ymd_opt(2022, 5, 26),
            hours_start: (hours > 0).then_some(9),
            hours_end: (hours > 0).then_some(9 + hours as u8 - 1),
            hours_count: (hours > 0).then_some(hours),
            temp_avg,
            relevant_cond_hours: hours,
        }
    }

    #[test]
    fn test_score_skips_unscored_days() {
        let city = CityResult::new(
            "paris",
            vec![day(Some(10.5), 4), day(None, 3), day(Some(7.0), 0), day(Some(1.5), 2)],
        );
        let score = city.score();
        assert_eq!(score.total_temp, 12.0);
        assert_eq!(score.total_hours, 6);
    }

    #[test]
    fn test_zero_average_still_scores() {
        let city = CityResult::new("oslo", vec![day(Some(0.0), 5)]);
        assert_eq!(city.score(), Score::new(0.0, 5));
    }

    #[test]
    fn test_score_ordering_is_lexicographic() {
        assert!(Score::new(10.0, 1) > Score::new(9.999, 100));
        assert!(Score::new(10.0, 5) > Score::new(10.0, 4));
        assert_eq!(Score::new(10.0, 5), Score::new(10.0, 5));
    }

    #[test]
    fn test_city_result_serializes_days_only() {
        let city = CityResult::new("paris", vec![day(Some(3.0), 2)]);
        let value = serde_json::to_value(&city).unwrap();
        assert!(value.get("city").is_none());
        assert_eq!(value["days"][0]["date"], "2022-05-26");
        assert_eq!(value["days"][0]["temp_avg"], 3.0);
    }

    #[test]
    fn test_empty_day_serializes_nulls() {
        let value = serde_json::to_value(DayStats::empty(None)).unwrap();
        assert!(value["hours_start"].is_null());
        assert!(value["temp_avg"].is_null());
        assert_eq!(value["relevant_cond_hours"], 0);
    }
}
