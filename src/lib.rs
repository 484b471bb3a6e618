//! liftstat - Strength-training statistics
//!
//! liftstat turns a user's logged workouts and bodyweight entries into the numbers a
//! training log shows: estimated one-rep maxes, double-progression advice, personal
//! records, bodyweight trends and a Monday–Sunday weekly summary.
//!
//! Every computation is a pure function of its inputs. The current instant, time
//! zone and data source are always passed in by the caller.

pub mod bodyweight;
pub mod calendar;
pub mod error;
pub mod format;
pub mod progression;
pub mod records;
pub mod snapshot;
pub mod source;
pub mod types;
pub mod validation;
pub mod weekly;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use bodyweight::{bodyweight_stats, BodyweightWindows};
pub use calendar::{week_bounds, WeekBounds};
pub use error::StatsError;
pub use progression::{estimate_1rm, progressive_overload_message, ProgressionAdvice};
pub use records::{best_estimated_1rm, heaviest_weight, max_reps_at_weight, PersonalRecords};
pub use snapshot::TrainingSnapshot;
pub use source::{SourceError, TrainingLog};
pub use types::{
    BodyweightEntry, BodyweightStats, ExerciseProfile, SetRecord, WeeklyStats, WorkoutWithSets,
};
pub use weekly::weekly_stats;

/// liftstat version
pub const LIFTSTAT_VERSION: &str = env!("CARGO_PKG_VERSION");
