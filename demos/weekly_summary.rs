//! Print this week's summary and bodyweight trend for a small sample log

use chrono::{DateTime, Utc};
use liftstat::bodyweight::{bodyweight_stats, BodyweightWindows};
use liftstat::format::{format_weight, weekly_summary_lines};
use liftstat::snapshot::TrainingSnapshot;
use liftstat::weekly::weekly_stats;

fn main() {
    let json = r#"{
        "user_id": "00000000-0000-0000-0000-00000000002a",
        "exercises": [
            { "id": "00000000-0000-0000-0000-000000000001", "name": "Bench press", "rep_min": 6, "rep_max": 10 }
        ],
        "workouts": [
            { "id": "00000000-0000-0000-0000-000000000101", "exercise_id": "00000000-0000-0000-0000-000000000001",
              "date": "2024-02-27", "weight": 80.0, "sets": [{ "reps": 9 }, { "reps": 8 }, { "reps": 8 }] },
            { "id": "00000000-0000-0000-0000-000000000102", "exercise_id": "00000000-0000-0000-0000-000000000001",
              "date": "2024-03-05", "weight": 80.0, "sets": [{ "reps": 10 }, { "reps": 10 }, { "reps": 9 }] }
        ],
        "bodyweight": [
            { "weight": 80.0, "date": "2024-03-10" },
            { "weight": 82.0, "date": "2024-03-01" }
        ]
    }"#;

    let snapshot = match TrainingSnapshot::from_json(json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    let now: DateTime<Utc> = match DateTime::parse_from_rfc3339("2024-03-10T18:00:00Z") {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    match weekly_stats(&snapshot, now, Some("Europe/Berlin")) {
        Some(stats) => weekly_summary_lines(&stats).iter().for_each(|l| println!("{l}")),
        None => println!("Weekly stats unavailable"),
    }

    match bodyweight_stats(&snapshot, now.date_naive(), &BodyweightWindows::default()) {
        Ok(stats) => {
            if let Some(diff) = stats.diff_from_previous {
                println!("Bodyweight since last entry: {} kg", format_weight(diff, true));
            }
        }
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
