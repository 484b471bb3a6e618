//! Weekly training summary
//!
//! Counts workouts, sets and volume for one Monday–Sunday week, and how many of
//! the week's workouts set a personal record for their exercise.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calendar::{week_bounds, WeekBounds};
use crate::error::StatsError;
use crate::progression::round_half_up;
use crate::records::workout_best_1rm;
use crate::source::{SourceError, TrainingLog};
use crate::types::{WeeklyStats, WorkoutWithSets};

/// Best values seen so far for one exercise
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BestSoFar {
    max_weight: f64,
    max_1rm: f64,
}

/// Running per-exercise maxima over a chronological workout history
#[derive(Debug, Default)]
pub struct PrTracker {
    best: HashMap<Uuid, BestSoFar>,
}

impl PrTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a workout and report whether it beat every earlier workout of its
    /// exercise on weight or on estimated 1RM.
    ///
    /// Workouts must be observed oldest first.
    pub fn observe(&mut self, workout: &WorkoutWithSets) -> bool {
        let best_1rm = workout_best_1rm(workout);
        let prev = self.best.entry(workout.exercise_id).or_default();

        let is_pr = workout.weight > prev.max_weight || best_1rm > prev.max_1rm;

        prev.max_weight = prev.max_weight.max(workout.weight);
        prev.max_1rm = prev.max_1rm.max(best_1rm);
        is_pr
    }
}

impl WeeklyStats {
    /// Summarize `week_workouts`, using `history` to detect PRs.
    ///
    /// `history` holds every workout of the week's exercises up to the end of the
    /// week, oldest first. Only history workouts dated inside `week` can count as PRs.
    pub fn compute(
        week_workouts: &[WorkoutWithSets],
        history: &[WorkoutWithSets],
        week: WeekBounds,
    ) -> Self {
        if week_workouts.is_empty() {
            return Self::default();
        }

        let set_count: usize = week_workouts.iter().map(|w| w.sets.len()).sum();
        let volume: f64 = week_workouts.iter().map(WorkoutWithSets::volume).sum();

        let mut tracker = PrTracker::new();
        let mut pr_count = 0u32;
        for workout in history {
            let is_pr = tracker.observe(workout);
            if is_pr && week.contains(workout.date) {
                pr_count += 1;
            }
        }

        Self {
            workout_count: week_workouts.len() as u32,
            set_count: set_count as u32,
            volume: round_half_up(volume) as i64,
            pr_count,
        }
    }
}

/// Weekly summary for the week containing `now`.
///
/// The week follows the local calendar of `timezone` when given, else UTC.
/// Returns `None` when the stats are unavailable: nobody is signed in, the zone
/// is unknown, or the data source failed. A week without workouts is `Some` with
/// all counts zero.
pub fn weekly_stats<L: TrainingLog + ?Sized>(
    log: &L,
    now: DateTime<Utc>,
    timezone: Option<&str>,
) -> Option<WeeklyStats> {
    match try_weekly_stats(log, now, timezone) {
        Ok(stats) => {
            debug!(?stats, "computed weekly stats");
            Some(stats)
        }
        Err(e) => {
            warn!(error = %e, "weekly stats unavailable");
            None
        }
    }
}

fn try_weekly_stats<L: TrainingLog + ?Sized>(
    log: &L,
    now: DateTime<Utc>,
    timezone: Option<&str>,
) -> Result<WeeklyStats, StatsError> {
    if log.current_user()?.is_none() {
        return Err(SourceError::Unauthenticated.into());
    }

    let week = week_bounds(now, timezone)?;
    let week_workouts = log.workouts_between(week.start, week.end)?;
    if week_workouts.is_empty() {
        return Ok(WeeklyStats::default());
    }

    let exercise_ids: Vec<Uuid> = week_workouts
        .iter()
        .map(|w| w.exercise_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let history = log.exercise_history(&exercise_ids, week.end)?;

    Ok(WeeklyStats::compute(&week_workouts, &history, week))
}
