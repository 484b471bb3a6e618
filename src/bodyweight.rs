//! Bodyweight trend statistics
//!
//! Entries must arrive newest first. The order is checked rather than trusted,
//! since the window deltas depend on it.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StatsError;
use crate::progression::round_to_tenth;
use crate::source::TrainingLog;
use crate::types::{BodyweightEntry, BodyweightStats};

/// Default averaging window in days
pub const DEFAULT_AVERAGE_DAYS: u64 = 7;

/// Default change window in days
pub const DEFAULT_CHANGE_DAYS: u64 = 30;

/// Window lengths used by [`BodyweightStats::compute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyweightWindows {
    pub average_days: u64,
    pub change_days: u64,
}

impl Default for BodyweightWindows {
    fn default() -> Self {
        Self {
            average_days: DEFAULT_AVERAGE_DAYS,
            change_days: DEFAULT_CHANGE_DAYS,
        }
    }
}

impl BodyweightStats {
    /// Compute trend statistics relative to `today`.
    ///
    /// A window of N days keeps entries dated on or after `today - N days`.
    pub fn compute(
        entries: &[BodyweightEntry],
        today: NaiveDate,
        windows: &BodyweightWindows,
    ) -> Result<Self, StatsError> {
        ensure_newest_first(entries)?;

        let Some(latest) = entries.first().copied() else {
            return Ok(Self::default());
        };

        let diff_from_previous = entries.get(1).map(|previous| latest.weight - previous.weight);

        let recent = in_window(entries, today, windows.average_days);
        let avg_7_days = if recent.is_empty() {
            None
        } else {
            let sum: f64 = recent.iter().map(|e| e.weight).sum();
            Some(round_to_tenth(sum / recent.len() as f64))
        };

        let month = in_window(entries, today, windows.change_days);
        let change_30_days = match (month.first(), month.last()) {
            (Some(newest), Some(oldest)) if month.len() >= 2 => {
                Some(round_to_tenth(newest.weight - oldest.weight))
            }
            _ => None,
        };

        let stats = Self {
            latest: Some(latest),
            diff_from_previous,
            avg_7_days,
            change_30_days,
        };
        debug!(entries = entries.len(), ?stats, "computed bodyweight stats");
        Ok(stats)
    }
}

/// Entries dated on or after `today - days`, order preserved
fn in_window(entries: &[BodyweightEntry], today: NaiveDate, days: u64) -> Vec<BodyweightEntry> {
    let cutoff = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
    entries.iter().copied().filter(|e| e.date >= cutoff).collect()
}

fn ensure_newest_first(entries: &[BodyweightEntry]) -> Result<(), StatsError> {
    match entries
        .windows(2)
        .position(|pair| pair[1].date > pair[0].date)
    {
        Some(i) => Err(StatsError::UnsortedEntries {
            index: i + 1,
            previous: entries[i].date,
            current: entries[i + 1].date,
        }),
        None => Ok(()),
    }
}

/// Load entries from `log` and compute their statistics.
///
/// An unreachable data store is reported as an error. Any other failure yields
/// all-empty statistics.
pub fn bodyweight_stats<L: TrainingLog + ?Sized>(
    log: &L,
    today: NaiveDate,
    windows: &BodyweightWindows,
) -> Result<BodyweightStats, StatsError> {
    let result = log
        .bodyweight_entries()
        .map_err(StatsError::from)
        .and_then(|entries| BodyweightStats::compute(&entries, today, windows));

    match result {
        Ok(stats) => Ok(stats),
        Err(e) if e.is_connectivity() => Err(e),
        Err(e) => {
            warn!(error = %e, "bodyweight stats unavailable");
            Ok(BodyweightStats::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(weight: f64, day: &str) -> BodyweightEntry {
        BodyweightEntry::new(weight, date(day))
    }

    fn compute(entries: &[BodyweightEntry], today: &str) -> BodyweightStats {
        BodyweightStats::compute(entries, date(today), &BodyweightWindows::default()).unwrap()
    }

    struct FailingLog(SourceError);

    impl TrainingLog for FailingLog {
        fn current_user(&self) -> Result<Option<Uuid>, SourceError> {
            Ok(Some(Uuid::nil()))
        }

        fn workouts_between(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<crate::types::WorkoutWithSets>, SourceError> {
            Err(self.0.clone())
        }

        fn exercise_history(
            &self,
            _exercise_ids: &[Uuid],
            _until: NaiveDate,
        ) -> Result<Vec<crate::types::WorkoutWithSets>, SourceError> {
            Err(self.0.clone())
        }

        fn bodyweight_entries(&self) -> Result<Vec<BodyweightEntry>, SourceError> {
            Err(self.0.clone())
        }
    }

    struct StaticLog(Vec<BodyweightEntry>);

    impl TrainingLog for StaticLog {
        fn current_user(&self) -> Result<Option<Uuid>, SourceError> {
            Ok(Some(Uuid::nil()))
        }

        fn workouts_between(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<crate::types::WorkoutWithSets>, SourceError> {
            Ok(Vec::new())
        }

        fn exercise_history(
            &self,
            _exercise_ids: &[Uuid],
            _until: NaiveDate,
        ) -> Result<Vec<crate::types::WorkoutWithSets>, SourceError> {
            Ok(Vec::new())
        }

        fn bodyweight_entries(&self) -> Result<Vec<BodyweightEntry>, SourceError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_empty_entries() {
        assert_eq!(compute(&[], "2024-03-10"), BodyweightStats::default());
    }

    #[test]
    fn test_single_entry() {
        let stats = compute(&[entry(80.4, "2024-03-10")], "2024-03-10");
        assert_eq!(stats.latest, Some(entry(80.4, "2024-03-10")));
        assert_eq!(stats.diff_from_previous, None);
        assert_eq!(stats.avg_7_days, Some(80.4));
        assert_eq!(stats.change_30_days, None);
    }

    #[test]
    fn test_diff_from_previous() {
        let entries = vec![entry(80.0, "2024-03-10"), entry(82.0, "2024-03-01")];
        let stats = compute(&entries, "2024-03-10");
        assert_eq!(stats.diff_from_previous, Some(-2.0));
        assert_eq!(stats.change_30_days, Some(-2.0));
    }

    #[test]
    fn test_seven_day_average_window() {
        let entries = vec![
            entry(80.0, "2024-03-10"),
            entry(81.0, "2024-03-06"),
            // exactly seven days back is still inside
            entry(81.5, "2024-03-03"),
            entry(90.0, "2024-03-02"),
        ];
        let stats = compute(&entries, "2024-03-10");
        // (80 + 81 + 81.5) / 3 = 80.833...
        assert_eq!(stats.avg_7_days, Some(80.8));
    }

    #[test]
    fn test_no_recent_entries() {
        let entries = vec![entry(80.0, "2024-01-10"), entry(81.0, "2024-01-01")];
        let stats = compute(&entries, "2024-03-10");
        assert_eq!(stats.latest, Some(entry(80.0, "2024-01-10")));
        assert_eq!(stats.diff_from_previous, Some(-1.0));
        assert_eq!(stats.avg_7_days, None);
        assert_eq!(stats.change_30_days, None);
    }

    #[test]
    fn test_thirty_day_change_ignores_older_entries() {
        let entries = vec![
            entry(79.2, "2024-03-10"),
            entry(80.1, "2024-02-25"),
            entry(81.0, "2024-02-09"),
            entry(85.0, "2024-01-15"),
        ];
        let stats = compute(&entries, "2024-03-10");
        // 79.2 - 81.0
        assert_eq!(stats.change_30_days, Some(-1.8));
    }

    #[test]
    fn test_thirty_day_change_with_gap_before_today() {
        let entries = vec![entry(78.0, "2024-02-28"), entry(79.0, "2024-02-20")];
        let stats = compute(&entries, "2024-03-10");
        assert_eq!(stats.avg_7_days, None);
        assert_eq!(stats.change_30_days, Some(-1.0));
    }

    #[test]
    fn test_custom_windows() {
        let entries = vec![entry(80.0, "2024-03-10"), entry(82.0, "2024-03-08")];
        let windows = BodyweightWindows {
            average_days: 1,
            change_days: 1,
        };
        let stats = BodyweightStats::compute(&entries, date("2024-03-10"), &windows).unwrap();
        assert_eq!(stats.avg_7_days, Some(80.0));
        assert_eq!(stats.change_30_days, None);
    }

    #[test]
    fn test_unsorted_entries_rejected() {
        let entries = vec![entry(80.0, "2024-03-01"), entry(82.0, "2024-03-10")];
        let err = BodyweightStats::compute(&entries, date("2024-03-10"), &BodyweightWindows::default())
            .unwrap_err();
        assert!(matches!(err, StatsError::UnsortedEntries { index: 1, .. }));
    }

    #[test]
    fn test_same_day_entries_allowed() {
        let entries = vec![entry(80.0, "2024-03-10"), entry(80.6, "2024-03-10")];
        let stats = compute(&entries, "2024-03-10");
        assert_eq!(stats.avg_7_days, Some(80.3));
    }

    #[test]
    fn test_idempotent() {
        let entries = vec![entry(80.0, "2024-03-10"), entry(82.0, "2024-03-01")];
        assert_eq!(compute(&entries, "2024-03-10"), compute(&entries, "2024-03-10"));
    }

    #[test]
    fn test_connectivity_failure_propagates() {
        let log = FailingLog(SourceError::Connectivity("fetch failed".to_string()));
        let result = bodyweight_stats(&log, date("2024-03-10"), &BodyweightWindows::default());
        assert!(result.unwrap_err().is_connectivity());
    }

    #[test]
    fn test_query_failure_falls_back_to_empty() {
        let log = FailingLog(SourceError::Query("permission denied".to_string()));
        let stats = bodyweight_stats(&log, date("2024-03-10"), &BodyweightWindows::default()).unwrap();
        assert_eq!(stats, BodyweightStats::default());
    }

    #[test]
    fn test_unsorted_source_falls_back_to_empty() {
        let log = StaticLog(vec![entry(80.0, "2024-03-01"), entry(82.0, "2024-03-10")]);
        let stats = bodyweight_stats(&log, date("2024-03-10"), &BodyweightWindows::default()).unwrap();
        assert_eq!(stats, BodyweightStats::default());
    }

    #[test]
    fn test_source_success() {
        let log = StaticLog(vec![entry(80.0, "2024-03-10"), entry(82.0, "2024-03-01")]);
        let stats = bodyweight_stats(&log, date("2024-03-10"), &BodyweightWindows::default()).unwrap();
        assert_eq!(stats.diff_from_previous, Some(-2.0));
        assert_eq!(stats.avg_7_days, Some(80.0));
    }
}
