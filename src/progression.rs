//! Strength estimation and double-progression advice
//!
//! - Estimated one-rep max with the Epley formula
//! - Next-session advice from the reps achieved against a target rep range

use serde::{Deserialize, Serialize};

/// Round to one decimal place, halves rounding up
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Round to the nearest integer, halves rounding up
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Estimate a one-rep max from a set: `weight × (1 + reps / 30)`, one decimal.
///
/// A set of zero reps returns the weight unchanged.
pub fn estimate_1rm(weight: f64, reps: u32) -> f64 {
    if reps == 0 {
        return weight;
    }
    round_to_tenth(weight * (1.0 + f64::from(reps) / 30.0))
}

/// What to do at the next session for an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionAdvice {
    /// Every set reached the top of the rep range
    IncreaseWeight,
    /// At least one set fell below the bottom of the rep range
    TooHeavy,
    /// Somewhere inside the range
    StayAtWeight,
}

impl ProgressionAdvice {
    /// Decide from the target range and the reps achieved in each set.
    ///
    /// Returns `None` when no sets were performed.
    pub fn from_sets(rep_min: u32, rep_max: u32, set_reps: &[u32]) -> Option<Self> {
        if set_reps.is_empty() {
            return None;
        }

        if set_reps.iter().all(|&r| r >= rep_max) {
            Some(ProgressionAdvice::IncreaseWeight)
        } else if set_reps.iter().any(|&r| r < rep_min) {
            Some(ProgressionAdvice::TooHeavy)
        } else {
            Some(ProgressionAdvice::StayAtWeight)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProgressionAdvice::IncreaseWeight => "Increase weight next session",
            ProgressionAdvice::TooHeavy => "Weight too heavy or stay at this weight",
            ProgressionAdvice::StayAtWeight => {
                "Stay at this weight until you hit the top of the range"
            }
        }
    }
}

/// Coaching message shown after a workout is saved; empty when there were no sets.
pub fn progressive_overload_message(rep_min: u32, rep_max: u32, set_reps: &[u32]) -> &'static str {
    ProgressionAdvice::from_sets(rep_min, rep_max, set_reps)
        .map(|advice| advice.message())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_1rm_epley() {
        // 100 × (1 + 5/30) = 116.666...
        assert_eq!(estimate_1rm(100.0, 5), 116.7);
        assert_eq!(estimate_1rm(60.0, 10), 80.0);
    }

    #[test]
    fn test_estimate_1rm_zero_reps() {
        assert_eq!(estimate_1rm(87.5, 0), 87.5);
    }

    #[test]
    fn test_estimate_never_below_weight() {
        for weight in [20.0, 42.5, 100.0, 182.5] {
            let mut previous = estimate_1rm(weight, 0);
            for reps in 1..=30 {
                let estimate = estimate_1rm(weight, reps);
                assert!(estimate >= weight);
                assert!(estimate >= previous);
                previous = estimate;
            }
        }
    }

    #[test]
    fn test_rounding_is_stable() {
        for (weight, reps) in [(100.0, 5), (72.5, 7), (33.3, 11)] {
            let once = estimate_1rm(weight, reps);
            assert_eq!(round_to_tenth(once), once);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(-0.25), -0.2);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn test_advice_increase_weight() {
        assert_eq!(
            progressive_overload_message(6, 12, &[12, 13, 14]),
            "Increase weight next session"
        );
    }

    #[test]
    fn test_advice_too_heavy() {
        assert_eq!(
            progressive_overload_message(6, 12, &[5, 8, 9]),
            "Weight too heavy or stay at this weight"
        );
    }

    #[test]
    fn test_advice_stay() {
        assert_eq!(
            progressive_overload_message(6, 12, &[8, 9, 10]),
            "Stay at this weight until you hit the top of the range"
        );
    }

    #[test]
    fn test_advice_empty() {
        assert_eq!(progressive_overload_message(6, 12, &[]), "");
        assert_eq!(ProgressionAdvice::from_sets(6, 12, &[]), None);
    }

    #[test]
    fn test_all_at_max_wins_over_below_min() {
        // Degenerate range where rep_max < rep_min: the first rule still wins
        assert_eq!(
            ProgressionAdvice::from_sets(10, 5, &[6, 7]),
            Some(ProgressionAdvice::IncreaseWeight)
        );
    }
}
