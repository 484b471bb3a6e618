//! liftstat CLI - Command-line interface for liftstat
//!
//! Commands:
//! - week: Weekly training summary
//! - bodyweight: Bodyweight trend statistics
//! - records: Personal records for one exercise
//! - progress: Weight and estimated 1RM over time for one exercise
//! - log: Validate a new workout and append it to a snapshot
//! - advise: Progression advice for a set of reps
//! - e1rm: Estimated one-rep max for a single set
//! - validate: Check a training snapshot for bad records

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use liftstat::bodyweight::{bodyweight_stats, BodyweightWindows, DEFAULT_AVERAGE_DAYS, DEFAULT_CHANGE_DAYS};
use liftstat::calendar;
use liftstat::format::{format_weight, weekly_summary_lines};
use liftstat::progression::{estimate_1rm, ProgressionAdvice};
use liftstat::records::{progress_series, PersonalRecords};
use liftstat::snapshot::TrainingSnapshot;
use liftstat::validation::{validate_bodyweight, WorkoutDraft};
use liftstat::weekly::weekly_stats;
use liftstat::{StatsError, LIFTSTAT_VERSION};

/// liftstat - Strength-training statistics from an exported training log
#[derive(Parser)]
#[command(name = "liftstat")]
#[command(version = LIFTSTAT_VERSION)]
#[command(about = "Estimated 1RM, PRs, bodyweight trends and weekly summaries", long_about = None)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly training summary (Monday to Sunday)
    Week {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,

        /// Time zone for week boundaries (IANA format, e.g., "Europe/Berlin"); UTC if omitted
        #[arg(long)]
        timezone: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Bodyweight trend statistics
    Bodyweight {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,

        /// Time zone used to determine today (IANA format)
        #[arg(long)]
        timezone: Option<String>,

        /// Averaging window in days
        #[arg(long, default_value_t = DEFAULT_AVERAGE_DAYS)]
        average_days: u64,

        /// Change window in days
        #[arg(long, default_value_t = DEFAULT_CHANGE_DAYS)]
        change_days: u64,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Personal records for one exercise
    Records {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Exercise id
        #[arg(short, long)]
        exercise: Uuid,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Weight and estimated 1RM over time for one exercise
    Progress {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Exercise id
        #[arg(short, long)]
        exercise: Uuid,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Validate a new workout and append it to a snapshot
    Log {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Exercise id
        #[arg(short, long)]
        exercise: Uuid,

        /// Working weight in kg
        #[arg(short, long)]
        weight: f64,

        /// Reps per set (3 to 5 sets)
        #[arg(required = true, allow_negative_numbers = true)]
        reps: Vec<i64>,

        /// Workout date (YYYY-MM-DD), defaults to today (UTC)
        #[arg(long)]
        date: Option<String>,

        /// Write the updated snapshot to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Progression advice for the reps achieved in each set
    Advise {
        /// Bottom of the target rep range
        #[arg(long)]
        rep_min: u32,

        /// Top of the target rep range
        #[arg(long)]
        rep_max: u32,

        /// Reps achieved per set
        reps: Vec<u32>,
    },

    /// Estimated one-rep max for a single set
    E1rm {
        /// Weight in kg
        #[arg(short, long)]
        weight: f64,

        /// Reps performed
        #[arg(short, long)]
        reps: u32,
    },

    /// Check a training snapshot for bad records
    Validate {
        /// Snapshot file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), String> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LIFTSTAT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))
}

fn run(cli: Cli) -> Result<(), LiftstatCliError> {
    match cli.command {
        Commands::Week {
            input,
            now,
            timezone,
            output_format,
        } => cmd_week(&input, now.as_deref(), timezone.as_deref(), output_format),

        Commands::Bodyweight {
            input,
            today,
            timezone,
            average_days,
            change_days,
            output_format,
        } => {
            let windows = BodyweightWindows {
                average_days,
                change_days,
            };
            cmd_bodyweight(&input, today.as_deref(), timezone.as_deref(), windows, output_format)
        }

        Commands::Records {
            input,
            exercise,
            output_format,
        } => cmd_records(&input, exercise, output_format),

        Commands::Progress {
            input,
            exercise,
            output_format,
        } => cmd_progress(&input, exercise, output_format),

        Commands::Log {
            input,
            exercise,
            weight,
            reps,
            date,
            save,
        } => cmd_log(&input, exercise, weight, reps, date.as_deref(), save.as_deref()),

        Commands::Advise {
            rep_min,
            rep_max,
            reps,
        } => {
            match ProgressionAdvice::from_sets(rep_min, rep_max, &reps) {
                Some(advice) => println!("{}", advice.message()),
                None => return Err(LiftstatCliError::NoSets),
            }
            Ok(())
        }

        Commands::E1rm { weight, reps } => {
            println!("{}", format_weight(estimate_1rm(weight, reps), false));
            Ok(())
        }

        Commands::Validate { input, json } => cmd_validate(&input, json),
    }
}

fn cmd_week(
    input: &Path,
    now: Option<&str>,
    timezone: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), LiftstatCliError> {
    let snapshot = read_snapshot(input)?;
    let now = match now {
        Some(s) => parse_instant(s)?,
        None => Utc::now(),
    };

    let week = calendar::week_bounds(now, timezone)?;
    let stats = weekly_stats(&snapshot, now, timezone).ok_or(LiftstatCliError::StatsUnavailable)?;

    match output_format {
        OutputFormat::Text => {
            println!("Week {} to {}", week.start, week.end);
            for line in weekly_summary_lines(&stats) {
                println!("{line}");
            }
        }
        format => print_json(&stats, &format)?,
    }
    Ok(())
}

fn cmd_bodyweight(
    input: &Path,
    today: Option<&str>,
    timezone: Option<&str>,
    windows: BodyweightWindows,
    output_format: OutputFormat,
) -> Result<(), LiftstatCliError> {
    let snapshot = read_snapshot(input)?;
    let today = match today {
        Some(s) => parse_date(s)?,
        None => calendar::today(Utc::now(), timezone)?,
    };

    let stats = bodyweight_stats(&snapshot, today, &windows)?;

    match output_format {
        OutputFormat::Text => {
            let Some(latest) = stats.latest else {
                println!("No bodyweight logged yet.");
                return Ok(());
            };
            println!("Latest:        {} kg ({})", format_weight(latest.weight, false), latest.date);
            if let Some(diff) = stats.diff_from_previous {
                println!("Since last:    {} kg", format_weight(diff, true));
            }
            if let Some(avg) = stats.avg_7_days {
                println!("{}-day avg:    {} kg", windows.average_days, format_weight(avg, false));
            }
            if let Some(change) = stats.change_30_days {
                println!("{}-day change: {} kg", windows.change_days, format_weight(change, true));
            }
        }
        format => print_json(&stats, &format)?,
    }
    Ok(())
}

fn cmd_records(input: &Path, exercise: Uuid, output_format: OutputFormat) -> Result<(), LiftstatCliError> {
    let snapshot = read_snapshot(input)?;
    let profile = snapshot
        .exercise(exercise)
        .ok_or(LiftstatCliError::UnknownExercise(exercise))?;

    let records = PersonalRecords::from_workouts(&snapshot.exercise_workouts(exercise));

    match output_format {
        OutputFormat::Text => {
            println!("{} (target {}-{} reps)", profile.name, profile.rep_min, profile.rep_max);
            if records.is_empty() {
                println!("No workouts logged yet.");
                return Ok(());
            }
            if let Some(heaviest) = records.heaviest_weight {
                println!("Heaviest weight: {} kg", format_weight(heaviest, false));
                if let Some(reps) = records.reps_at_heaviest {
                    println!("Best at {} kg:   {} reps", format_weight(heaviest, false), reps);
                }
            }
            if let Some(best) = records.best_estimated_1rm {
                println!("Est. 1RM:        {} kg", format_weight(best, false));
            }
        }
        format => print_json(&records, &format)?,
    }
    Ok(())
}

fn cmd_progress(input: &Path, exercise: Uuid, output_format: OutputFormat) -> Result<(), LiftstatCliError> {
    let snapshot = read_snapshot(input)?;
    if snapshot.exercise(exercise).is_none() {
        return Err(LiftstatCliError::UnknownExercise(exercise));
    }

    let series = progress_series(&snapshot.exercise_workouts(exercise));

    match output_format {
        OutputFormat::Text => {
            for point in &series {
                let estimate = point
                    .estimated_1rm
                    .map(|e| format!("{} kg", format_weight(e, false)))
                    .unwrap_or_else(|| "-".to_string());
                println!("{}  {:>8} kg  e1RM {}", point.date, format_weight(point.weight, false), estimate);
            }
        }
        format => print_json(&series, &format)?,
    }
    Ok(())
}

fn cmd_log(
    input: &Path,
    exercise: Uuid,
    weight: f64,
    reps: Vec<i64>,
    date: Option<&str>,
    save: Option<&Path>,
) -> Result<(), LiftstatCliError> {
    let mut snapshot = read_snapshot(input)?;
    let profile = snapshot
        .exercise(exercise)
        .ok_or(LiftstatCliError::UnknownExercise(exercise))?;

    let draft = WorkoutDraft {
        date: match date {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive(),
        },
        weight,
        reps: reps.into_iter().map(Some).collect(),
    };
    let logged = draft.validate(profile)?;

    println!("{}", logged.message);
    snapshot.workouts.push(logged.workout);

    if let Some(path) = save {
        fs::write(path, snapshot.to_json()?)?;
    }
    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), LiftstatCliError> {
    let snapshot = read_snapshot(input)?;
    let mut errors: Vec<ValidationErrorDetail> = Vec::new();

    for exercise in &snapshot.exercises {
        if let Err(e) = exercise.validate() {
            errors.push(ValidationErrorDetail {
                record: format!("exercise {}", exercise.id),
                error: e.to_string(),
            });
        }
    }

    for workout in &snapshot.workouts {
        if snapshot.exercise(workout.exercise_id).is_none() {
            errors.push(ValidationErrorDetail {
                record: format!("workout {}", workout.id),
                error: format!("unknown exercise {}", workout.exercise_id),
            });
        }
        if !(workout.weight.is_finite() && workout.weight > 0.0) {
            errors.push(ValidationErrorDetail {
                record: format!("workout {}", workout.id),
                error: format!("weight must be > 0, got {}", workout.weight),
            });
        }
    }

    for entry in &snapshot.bodyweight {
        if let Err(e) = validate_bodyweight(entry.weight, entry.date) {
            errors.push(ValidationErrorDetail {
                record: format!("bodyweight {}", entry.date),
                error: e.to_string(),
            });
        }
    }

    let total_records = snapshot.exercises.len() + snapshot.workouts.len() + snapshot.bodyweight.len();
    let report = ValidationReport {
        total_records,
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - {}: {}", err.record, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(LiftstatCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

// Helper functions

fn read_snapshot(input: &Path) -> Result<TrainingSnapshot, LiftstatCliError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(LiftstatCliError::NoInput);
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    Ok(TrainingSnapshot::from_json(&data)?)
}

fn print_json<T: Serialize>(value: &T, format: &OutputFormat) -> Result<(), LiftstatCliError> {
    let out = match format {
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
        _ => serde_json::to_string(value)?,
    };
    println!("{out}");
    Ok(())
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, LiftstatCliError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StatsError::DateParseError(format!("{s}: {e}")).into())
}

fn parse_date(s: &str) -> Result<NaiveDate, LiftstatCliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StatsError::DateParseError(format!("{s}: {e}")).into())
}

// Error types

#[derive(Debug)]
enum LiftstatCliError {
    Io(io::Error),
    Stats(StatsError),
    Json(serde_json::Error),
    Validation(liftstat::validation::ValidationError),
    NoInput,
    NoSets,
    UnknownExercise(Uuid),
    StatsUnavailable,
    ValidationFailed(usize),
}

impl From<io::Error> for LiftstatCliError {
    fn from(e: io::Error) -> Self {
        LiftstatCliError::Io(e)
    }
}

impl From<StatsError> for LiftstatCliError {
    fn from(e: StatsError) -> Self {
        LiftstatCliError::Stats(e)
    }
}

impl From<serde_json::Error> for LiftstatCliError {
    fn from(e: serde_json::Error) -> Self {
        LiftstatCliError::Json(e)
    }
}

impl From<liftstat::validation::ValidationError> for LiftstatCliError {
    fn from(e: liftstat::validation::ValidationError) -> Self {
        LiftstatCliError::Validation(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LiftstatCliError> for CliError {
    fn from(e: LiftstatCliError) -> Self {
        match e {
            LiftstatCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LiftstatCliError::Stats(e) if e.is_connectivity() => CliError {
                code: "SOURCE_UNREACHABLE".to_string(),
                message: e.to_string(),
                hint: Some("Check that the data store is reachable".to_string()),
            },
            LiftstatCliError::Stats(e) => CliError {
                code: "STATS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the snapshot contents and date/time zone arguments".to_string()),
            },
            LiftstatCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            LiftstatCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            LiftstatCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "stdin is a terminal, expected a snapshot on a pipe".to_string(),
                hint: Some("Pipe a snapshot in or pass --input <file>".to_string()),
            },
            LiftstatCliError::NoSets => CliError {
                code: "NO_SETS".to_string(),
                message: "No reps given".to_string(),
                hint: Some("Pass the reps of each set, e.g. 'liftstat advise --rep-min 6 --rep-max 12 10 9 8'".to_string()),
            },
            LiftstatCliError::UnknownExercise(id) => CliError {
                code: "UNKNOWN_EXERCISE".to_string(),
                message: format!("No exercise with id {id} in snapshot"),
                hint: Some("Run 'liftstat validate' to list snapshot problems".to_string()),
            },
            LiftstatCliError::StatsUnavailable => CliError {
                code: "STATS_UNAVAILABLE".to_string(),
                message: "Weekly stats unavailable".to_string(),
                hint: Some("Ensure the snapshot has a user_id".to_string()),
            },
            LiftstatCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct ValidationReport {
    total_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(Serialize)]
struct ValidationErrorDetail {
    record: String,
    error: String,
}
