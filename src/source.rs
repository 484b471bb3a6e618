//! Upstream data access
//!
//! The aggregators never talk to storage themselves. A [`TrainingLog`] hands them
//! already-materialized records, and its failures are classified here so each
//! aggregator can apply its own failure policy.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{BodyweightEntry, WorkoutWithSets};

/// Markers of an unreachable backend in raw upstream error messages
const CONNECTIVITY_MARKERS: [&str; 4] = ["fetch failed", "ECONNREFUSED", "ENOTFOUND", "network"];

/// Failure reported by a training log
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Cannot reach the data store: {0}")]
    Connectivity(String),

    #[error("No signed-in user")]
    Unauthenticated,

    #[error("Query failed: {0}")]
    Query(String),
}

impl SourceError {
    /// Classify a raw upstream error message
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if CONNECTIVITY_MARKERS.iter().any(|m| message.contains(m)) {
            SourceError::Connectivity(message)
        } else {
            SourceError::Query(message)
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, SourceError::Connectivity(_))
    }
}

/// Read access to one user's training data
pub trait TrainingLog {
    /// Identifier of the signed-in user, `None` when nobody is signed in
    fn current_user(&self) -> Result<Option<Uuid>, SourceError>;

    /// Workouts dated within `[start, end]`, oldest first
    fn workouts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutWithSets>, SourceError>;

    /// Every workout of the given exercises dated on or before `until`, oldest first
    fn exercise_history(
        &self,
        exercise_ids: &[Uuid],
        until: NaiveDate,
    ) -> Result<Vec<WorkoutWithSets>, SourceError>;

    /// All bodyweight entries, newest first
    fn bodyweight_entries(&self) -> Result<Vec<BodyweightEntry>, SourceError>;
}
