//! Error types for liftstat

use chrono::NaiveDate;
use thiserror::Error;

use crate::source::SourceError;

/// Errors that can occur while computing statistics
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Entries not sorted newest first: entry {index} ({current}) is newer than the entry before it ({previous})")]
    UnsortedEntries {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Data source failure: {0}")]
    Source(#[from] SourceError),
}

impl StatsError {
    /// True when the failure comes from an unreachable data source
    pub fn is_connectivity(&self) -> bool {
        matches!(self, StatsError::Source(e) if e.is_connectivity())
    }
}
