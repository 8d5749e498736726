//! How often the same personality comes back within a station's schedule.

use crate::analyzers::types::Recurrence;
use crate::analyzers::utility::mean;
use crate::classify::ByGroup;
use crate::grid::Appearance;
use crate::join::JoinedAppearance;
use std::collections::HashMap;

/// Occurrences of each non-null identifier.
pub fn value_counts<'a>(ids: impl IntoIterator<Item = Option<&'a str>>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for id in ids.into_iter().flatten() {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Mean number of appearances per distinct identifier. `None` when no
/// identifier appears at all.
pub fn average_recurrence<'a>(ids: impl IntoIterator<Item = Option<&'a str>>) -> Option<f64> {
    let counts: Vec<f64> = value_counts(ids).into_values().map(|c| c as f64).collect();
    mean(&counts)
}

/// Overall and per-group recurrence for one station.
pub fn station_recurrence(
    appearances: &[Appearance],
    joined: &ByGroup<Vec<JoinedAppearance>>,
) -> Recurrence {
    Recurrence {
        overall: average_recurrence(appearances.iter().map(|a| a.personality_id.as_deref())),
        by_group: joined.map(|rows| {
            average_recurrence(rows.iter().map(|r| r.appearance.personality_id.as_deref()))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_skips_null() {
        let counts = value_counts([Some("a"), None, Some("a"), Some("b")]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
    }

    #[test]
    fn test_average_uses_distinct_denominator() {
        // a: 3, b: 1 -> (3 + 1) / 2
        let avg = average_recurrence([Some("a"), Some("a"), Some("b"), Some("a"), None]);
        assert_eq!(avg, Some(2.0));
    }

    #[test]
    fn test_average_of_nothing_is_none() {
        assert_eq!(average_recurrence([None, None]), None);
        assert_eq!(average_recurrence(std::iter::empty()), None);
    }
}
