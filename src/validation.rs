//! Input rules for user-entered records
//!
//! Drafts come straight from a form. Validation turns them into the record types
//! the statistics operate on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progression::progressive_overload_message;
use crate::types::{BodyweightEntry, ExerciseProfile, SetRecord, WorkoutWithSets};

/// Fewest valid sets a logged workout may have
pub const MIN_SETS: usize = 3;

/// Most sets a logged workout may have
pub const MAX_SETS: usize = 5;

/// Validation errors for drafts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Need at least {} sets with valid reps and weight > 0", MIN_SETS)]
    NotEnoughSets,

    #[error("At most {} sets can be logged, got {0}", MAX_SETS)]
    TooManySets(usize),

    #[error("Enter a valid weight (kg).")]
    InvalidWeight,

    #[error("Invalid exercise: name required, rep_min >= 1, rep_max >= rep_min")]
    InvalidExercise,
}

/// A workout as entered: one rep field per set, some possibly blank or bad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub date: NaiveDate,
    pub weight: f64,
    pub reps: Vec<Option<i64>>,
}

/// A validated workout and the advice for the next session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedWorkout {
    pub workout: WorkoutWithSets,
    pub message: String,
}

impl WorkoutDraft {
    /// Validate against `exercise`, dropping blank and negative rep entries
    pub fn validate(&self, exercise: &ExerciseProfile) -> Result<LoggedWorkout, ValidationError> {
        if self.reps.len() > MAX_SETS {
            return Err(ValidationError::TooManySets(self.reps.len()));
        }

        let reps: Vec<u32> = self
            .reps
            .iter()
            .flatten()
            .filter_map(|&r| u32::try_from(r).ok())
            .collect();

        if reps.len() < MIN_SETS || !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ValidationError::NotEnoughSets);
        }

        let message = progressive_overload_message(exercise.rep_min, exercise.rep_max, &reps);
        Ok(LoggedWorkout {
            workout: WorkoutWithSets {
                id: Uuid::new_v4(),
                exercise_id: exercise.id,
                date: self.date,
                weight: self.weight,
                sets: reps.into_iter().map(SetRecord::new).collect(),
            },
            message: message.to_string(),
        })
    }
}

/// Check a bodyweight measurement before it is stored
pub fn validate_bodyweight(weight: f64, date: NaiveDate) -> Result<BodyweightEntry, ValidationError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(BodyweightEntry::new(weight, date))
    } else {
        Err(ValidationError::InvalidWeight)
    }
}

impl ExerciseProfile {
    /// Check the name and rep range
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.rep_min < 1 || self.rep_max < self.rep_min {
            return Err(ValidationError::InvalidExercise);
        }
        Ok(())
    }
}
