//! Display helpers for weights, volume and the weekly summary

use crate::progression::{round_half_up, round_to_tenth};
use crate::types::WeeklyStats;

/// Format a weight with one decimal, e.g. `72.5`.
///
/// With `signed`, positive values get a leading `+` so changes read as `+1.2`.
pub fn format_weight(value: f64, signed: bool) -> String {
    let rounded = round_to_tenth(value);
    // avoid printing "-0.0" for tiny negative changes
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if signed && rounded > 0.0 {
        format!("+{rounded:.1}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Format a volume as a whole number with thousands separators, e.g. `12,450`
pub fn format_volume(volume: f64) -> String {
    let whole = round_half_up(volume) as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Human-readable lines for a weekly summary
pub fn weekly_summary_lines(stats: &WeeklyStats) -> Vec<String> {
    if !stats.has_activity() {
        return vec!["No workouts logged this week yet.".to_string()];
    }

    let mut lines = vec![format!(
        "{} • {} • {}kg volume",
        plural(stats.workout_count, "workout"),
        plural(stats.set_count, "set"),
        format_volume(stats.volume as f64)
    )];
    if stats.pr_count > 0 {
        lines.push(format!("{} hit", plural(stats.pr_count, "PR")));
    }
    lines
}
