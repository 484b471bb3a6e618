//! In-memory training log
//!
//! A [`TrainingSnapshot`] holds one user's exported data and serves it through
//! [`TrainingLog`] with the orderings the aggregators expect.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StatsError;
use crate::source::{SourceError, TrainingLog};
use crate::types::{BodyweightEntry, ExerciseProfile, WorkoutWithSets};

/// Exported training data for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    /// Owner of the data; `None` behaves like a signed-out session
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub exercises: Vec<ExerciseProfile>,
    #[serde(default)]
    pub workouts: Vec<WorkoutWithSets>,
    #[serde(default)]
    pub bodyweight: Vec<BodyweightEntry>,
}

impl TrainingSnapshot {
    /// Load a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> Result<String, StatsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn exercise(&self, id: Uuid) -> Option<&ExerciseProfile> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Workouts of one exercise, newest first
    pub fn exercise_workouts(&self, exercise_id: Uuid) -> Vec<WorkoutWithSets> {
        let mut workouts: Vec<WorkoutWithSets> = self
            .workouts
            .iter()
            .filter(|w| w.exercise_id == exercise_id)
            .cloned()
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts
    }

    fn oldest_first<F>(&self, keep: F) -> Vec<WorkoutWithSets>
    where
        F: Fn(&WorkoutWithSets) -> bool,
    {
        let mut workouts: Vec<WorkoutWithSets> =
            self.workouts.iter().filter(|w| keep(w)).cloned().collect();
        workouts.sort_by_key(|w| w.date);
        workouts
    }
}

impl TrainingLog for TrainingSnapshot {
    fn current_user(&self) -> Result<Option<Uuid>, SourceError> {
        Ok(self.user_id)
    }

    fn workouts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutWithSets>, SourceError> {
        Ok(self.oldest_first(|w| w.date >= start && w.date <= end))
    }

    fn exercise_history(
        &self,
        exercise_ids: &[Uuid],
        until: NaiveDate,
    ) -> Result<Vec<WorkoutWithSets>, SourceError> {
        Ok(self.oldest_first(|w| exercise_ids.contains(&w.exercise_id) && w.date <= until))
    }

    fn bodyweight_entries(&self) -> Result<Vec<BodyweightEntry>, SourceError> {
        let mut entries = self.bodyweight.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodyweight::{bodyweight_stats, BodyweightWindows};
    use crate::weekly::weekly_stats;
    use chrono::{DateTime, Utc};

    fn sample_snapshot_json() -> &'static str {
        r#"{
            "user_id": "00000000-0000-0000-0000-00000000002a",
            "exercises": [
                { "id": "00000000-0000-0000-0000-000000000001", "name": "Bench press", "rep_min": 6, "rep_max": 10 },
                { "id": "00000000-0000-0000-0000-000000000002", "name": "Squat", "rep_min": 5, "rep_max": 8 }
            ],
            "workouts": [
                {
                    "id": "00000000-0000-0000-0000-000000000103",
                    "exercise_id": "00000000-0000-0000-0000-000000000001",
                    "date": "2024-03-05",
                    "weight": 80.0,
                    "sets": [{ "reps": 10 }, { "reps": 10 }, { "reps": 9 }]
                },
                {
                    "id": "00000000-0000-0000-0000-000000000101",
                    "exercise_id": "00000000-0000-0000-0000-000000000001",
                    "date": "2024-02-27",
                    "weight": 80.0,
                    "sets": [{ "reps": 9 }, { "reps": 8 }, { "reps": 8 }]
                },
                {
                    "id": "00000000-0000-0000-0000-000000000102",
                    "exercise_id": "00000000-0000-0000-0000-000000000002",
                    "date": "2024-03-06",
                    "weight": 120.0,
                    "sets": [{ "reps": 5 }, { "reps": 5 }, { "reps": 5 }]
                }
            ],
            "bodyweight": [
                { "weight": 82.0, "date": "2024-03-01" },
                { "weight": 80.0, "date": "2024-03-10" }
            ]
        }"#
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_snapshot() {
        let snapshot = TrainingSnapshot::from_json(sample_snapshot_json()).unwrap();
        assert_eq!(snapshot.exercises.len(), 2);
        assert_eq!(snapshot.workouts.len(), 3);
        assert_eq!(snapshot.user_id, Some(Uuid::from_u128(42)));
        assert_eq!(
            snapshot.exercise(Uuid::from_u128(2)).map(|e| e.name.as_str()),
            Some("Squat")
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TrainingSnapshot::from_json("not json"),
            Err(StatsError::JsonError(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_workouts() {
        let snapshot = TrainingSnapshot::from_json(sample_snapshot_json()).unwrap();
        let reloaded = TrainingSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.workouts, snapshot.workouts);
    }

    #[test]
    fn test_log_orderings() {
        let snapshot = TrainingSnapshot::from_json(sample_snapshot_json()).unwrap();

        let week = snapshot
            .workouts_between(date("2024-03-04"), date("2024-03-10"))
            .unwrap();
        let dates: Vec<NaiveDate> = week.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![date("2024-03-05"), date("2024-03-06")]);

        let history = snapshot
            .exercise_history(&[Uuid::from_u128(1)], date("2024-03-10"))
            .unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![date("2024-02-27"), date("2024-03-05")]);

        let entries = snapshot.bodyweight_entries().unwrap();
        assert_eq!(entries[0].date, date("2024-03-10"));

        let newest_first = snapshot.exercise_workouts(Uuid::from_u128(1));
        assert_eq!(newest_first[0].date, date("2024-03-05"));
    }

    #[test]
    fn test_snapshot_through_aggregators() {
        let snapshot = TrainingSnapshot::from_json(sample_snapshot_json()).unwrap();
        let now = DateTime::parse_from_rfc3339("2024-03-10T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let weekly = weekly_stats(&snapshot, now, None).unwrap();
        assert_eq!(weekly.workout_count, 2);
        assert_eq!(weekly.set_count, 6);
        // 80 × 29 + 120 × 15
        assert_eq!(weekly.volume, 4120);
        assert_eq!(weekly.pr_count, 2);

        let body = bodyweight_stats(&snapshot, date("2024-03-10"), &BodyweightWindows::default())
            .unwrap();
        assert_eq!(body.diff_from_previous, Some(-2.0));
    }

    #[test]
    fn test_signed_out_snapshot() {
        let mut snapshot = TrainingSnapshot::from_json(sample_snapshot_json()).unwrap();
        snapshot.user_id = None;
        let now = DateTime::parse_from_rfc3339("2024-03-10T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(weekly_stats(&snapshot, now, None), None);
    }
}
