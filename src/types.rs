//! Core types for liftstat
//!
//! The records here are read-only snapshots handed over by the storage layer.
//! The result structures are what the aggregators return to a presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed set: the reps performed at the owning workout's weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    pub reps: u32,
}

impl SetRecord {
    pub fn new(reps: u32) -> Self {
        Self { reps }
    }
}

/// A workout for one exercise on one calendar date, with its sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWithSets {
    pub id: Uuid,
    pub exercise_id: Uuid,
    /// Calendar date the workout was performed (no time component)
    pub date: NaiveDate,
    /// Working weight in kilograms, shared by every set
    pub weight: f64,
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

impl WorkoutWithSets {
    /// Build a workout with a fresh identifier
    pub fn new(exercise_id: Uuid, date: NaiveDate, weight: f64, reps: &[u32]) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id,
            date,
            weight,
            sets: reps.iter().copied().map(SetRecord::new).collect(),
        }
    }

    /// Reps of every set, in stored order
    pub fn set_reps(&self) -> Vec<u32> {
        self.sets.iter().map(|s| s.reps).collect()
    }

    /// Training volume of this workout: weight × reps summed over sets
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(|s| self.weight * f64::from(s.reps)).sum()
    }
}

/// Exercise definition with its target rep range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub rep_min: u32,
    pub rep_max: u32,
}

/// One logged bodyweight measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyweightEntry {
    /// Bodyweight in kilograms
    pub weight: f64,
    pub date: NaiveDate,
}

impl BodyweightEntry {
    pub fn new(weight: f64, date: NaiveDate) -> Self {
        Self { weight, date }
    }
}

/// Bodyweight trend summary.
///
/// Every field is `None` when there is not enough data for it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyweightStats {
    /// Most recent entry
    pub latest: Option<BodyweightEntry>,
    /// Latest weight minus the previous entry's weight (positive = gained)
    pub diff_from_previous: Option<f64>,
    /// Mean weight over the short window, one decimal
    pub avg_7_days: Option<f64>,
    /// Newest minus oldest weight inside the long window, one decimal
    pub change_30_days: Option<f64>,
}

/// Training summary for one Monday–Sunday week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub workout_count: u32,
    pub set_count: u32,
    /// Sum of weight × reps over the week's sets, rounded to the nearest kilogram
    pub volume: i64,
    /// Workouts in the week that beat the exercise's previous best weight or estimated 1RM
    pub pr_count: u32,
}

impl WeeklyStats {
    pub fn has_activity(&self) -> bool {
        self.workout_count > 0
    }
}
