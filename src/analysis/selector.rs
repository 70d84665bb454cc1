//! Selection of the most favourable cities

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{ResultSet, Score};

/// Cities sharing the highest [`Score`], sorted by name.
///
/// Ties are kept: every city whose score equals the maximum is returned.
/// An empty result set yields an empty list.
#[must_use]
pub fn select_best(results: &ResultSet) -> Vec<String> {
    let mut by_score: BTreeMap<Score, Vec<String>> = BTreeMap::new();
    for (name, city) in results {
        let score = city.score();
        debug!(
            city = %name,
            total_temp = score.total_temp,
            total_hours = score.total_hours,
            "Scored city"
        );
        by_score.entry(score).or_default().push(name.clone());
    }

    by_score
        .pop_last()
        .map(|(_, mut cities)| {
            cities.sort();
            cities
        })
        .unwrap_or_default()
}
