//! FFI bindings for liftstat
//!
//! This module provides C-compatible functions for calling liftstat from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `liftstat_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::bodyweight::{bodyweight_stats, BodyweightWindows};
use crate::error::StatsError;
use crate::progression::{estimate_1rm, progressive_overload_message};
use crate::snapshot::TrainingSnapshot;
use crate::weekly::weekly_stats;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, StatsError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StatsError::DateParseError(format!("{s}: {e}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, StatsError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| StatsError::DateParseError(format!("{s}: {e}")))
}

fn weekly_json(snapshot_json: &str, now: &str, timezone: Option<&str>) -> Result<String, StatsError> {
    let snapshot = TrainingSnapshot::from_json(snapshot_json)?;
    let now = parse_instant(now)?;
    let stats = weekly_stats(&snapshot, now, timezone);
    Ok(serde_json::to_string(&stats)?)
}

fn bodyweight_json(snapshot_json: &str, today: &str) -> Result<String, StatsError> {
    let snapshot = TrainingSnapshot::from_json(snapshot_json)?;
    let today = parse_date(today)?;
    let stats = bodyweight_stats(&snapshot, today, &BodyweightWindows::default())?;
    Ok(serde_json::to_string(&stats)?)
}

fn finish(result: Result<String, StatsError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Weekly summary for the week containing `now` as JSON.
///
/// The result is the literal `null` when the stats are unavailable.
///
/// # Safety
/// - `snapshot_json` and `now` (RFC 3339) must be valid null-terminated C strings.
/// - `timezone` is an IANA zone name, or NULL for UTC.
/// - Returns a newly allocated string that must be freed with `liftstat_free_string`.
/// - Returns NULL on error; call `liftstat_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn liftstat_weekly_stats(
    snapshot_json: *const c_char,
    now: *const c_char,
    timezone: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(snapshot_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let now_str = match cstr_to_string(now) {
        Some(s) => s,
        None => {
            set_last_error("Invalid timestamp string pointer");
            return ptr::null_mut();
        }
    };

    let tz_str = cstr_to_string(timezone);

    finish(weekly_json(&json_str, &now_str, tz_str.as_deref()))
}

/// Bodyweight trend statistics relative to `today` (`YYYY-MM-DD`) as JSON.
///
/// # Safety
/// - `snapshot_json` and `today` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `liftstat_free_string`.
/// - Returns NULL on error (including an unreachable data store); call
///   `liftstat_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn liftstat_bodyweight_stats(
    snapshot_json: *const c_char,
    today: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(snapshot_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let today_str = match cstr_to_string(today) {
        Some(s) => s,
        None => {
            set_last_error("Invalid date string pointer");
            return ptr::null_mut();
        }
    };

    finish(bodyweight_json(&json_str, &today_str))
}

// ============================================================================
// Progression
// ============================================================================

/// Progression message for the reps achieved in each set.
///
/// # Safety
/// - `reps` must point to `len` readable `u32` values (may be NULL when `len` is 0).
/// - Returns a newly allocated string that must be freed with `liftstat_free_string`.
#[no_mangle]
pub unsafe extern "C" fn liftstat_overload_message(
    rep_min: u32,
    rep_max: u32,
    reps: *const u32,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    let set_reps: &[u32] = if reps.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(reps, len)
    };

    string_to_cstr(progressive_overload_message(rep_min, rep_max, set_reps))
}

/// Estimated one-rep max for a set.
#[no_mangle]
pub extern "C" fn liftstat_estimate_1rm(weight: f64, reps: u32) -> f64 {
    estimate_1rm(weight, reps)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local string; do NOT free this pointer.
/// - The pointer is valid until the next liftstat function call on the same thread.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn liftstat_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Free a string returned by liftstat functions.
///
/// # Safety
/// - `s` must be a pointer returned by a liftstat function, or NULL.
/// - Must not be called twice on the same pointer.
#[no_mangle]
pub unsafe extern "C" fn liftstat_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the liftstat version string.
///
/// # Safety
/// - Returns a pointer to a static string; do NOT free this pointer.
#[no_mangle]
pub unsafe extern "C" fn liftstat_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
