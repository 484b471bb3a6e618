//! Personal records and progress series for one exercise
//!
//! All functions take the exercise's workout history in any order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::progression::{estimate_1rm, round_to_tenth};
use crate::types::WorkoutWithSets;

/// Heaviest working weight ever used, or `None` without workouts
pub fn heaviest_weight(workouts: &[WorkoutWithSets]) -> Option<f64> {
    workouts.iter().map(|w| w.weight).reduce(f64::max)
}

/// Best single-set reps among workouts done at exactly `weight`.
///
/// `None` when no workout used that weight, or those workouts have no sets.
pub fn max_reps_at_weight(workouts: &[WorkoutWithSets], weight: f64) -> Option<u32> {
    workouts
        .iter()
        .filter(|w| w.weight == weight)
        .flat_map(|w| w.sets.iter().map(|s| s.reps))
        .max()
}

/// Best estimated 1RM of a single workout over its sets; zero without sets
pub fn workout_best_1rm(workout: &WorkoutWithSets) -> f64 {
    workout
        .sets
        .iter()
        .map(|s| estimate_1rm(workout.weight, s.reps))
        .fold(0.0, f64::max)
}

/// Best estimated 1RM across every set of every workout, one decimal.
///
/// A best of exactly zero counts as no data.
pub fn best_estimated_1rm(workouts: &[WorkoutWithSets]) -> Option<f64> {
    let best = workouts.iter().map(workout_best_1rm).fold(0.0, f64::max);
    if best == 0.0 {
        None
    } else {
        Some(round_to_tenth(best))
    }
}

/// PR summary shown for an exercise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalRecords {
    pub heaviest_weight: Option<f64>,
    /// Best set at the heaviest weight
    pub reps_at_heaviest: Option<u32>,
    pub best_estimated_1rm: Option<f64>,
}

impl PersonalRecords {
    pub fn from_workouts(workouts: &[WorkoutWithSets]) -> Self {
        let heaviest = heaviest_weight(workouts);
        Self {
            heaviest_weight: heaviest,
            reps_at_heaviest: heaviest.and_then(|w| max_reps_at_weight(workouts, w)),
            best_estimated_1rm: best_estimated_1rm(workouts),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heaviest_weight.is_none() && self.best_estimated_1rm.is_none()
    }
}

/// One chart point per workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub weight: f64,
    /// Estimate from the set with the most reps; `None` for a workout without sets
    pub estimated_1rm: Option<f64>,
}

/// Weight and estimated 1RM over time, oldest first.
///
/// Workouts on the same date keep their input order.
pub fn progress_series(workouts: &[WorkoutWithSets]) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = workouts
        .iter()
        .map(|w| {
            let most_reps = w.sets.iter().map(|s| s.reps).max();
            ProgressPoint {
                date: w.date,
                weight: w.weight,
                estimated_1rm: most_reps.map(|reps| estimate_1rm(w.weight, reps)),
            }
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}
