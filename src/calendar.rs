//! Week boundaries
//!
//! A training week runs Monday through Sunday. The boundaries are calendar dates,
//! taken from the local date of the reference instant in the chosen time zone.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Inclusive Monday..=Sunday date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekBounds {
    /// The week that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        let days_from_monday = u64::from(date.weekday().num_days_from_monday());
        let start = date - Days::new(days_from_monday);
        Self {
            start,
            end: start + Days::new(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Parse an IANA time zone name such as `Europe/Berlin`
pub fn parse_timezone(name: &str) -> Result<Tz, StatsError> {
    name.parse::<Tz>()
        .map_err(|_| StatsError::InvalidTimezone(name.to_string()))
}

/// Local calendar date of `instant` in `tz`
pub fn local_date<T: TimeZone>(instant: DateTime<Utc>, tz: &T) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Week containing `instant` in `tz`
pub fn week_bounds_in<T: TimeZone>(instant: DateTime<Utc>, tz: &T) -> WeekBounds {
    WeekBounds::containing(local_date(instant, tz))
}

/// Week containing `instant` on the UTC calendar
pub fn week_bounds_utc(instant: DateTime<Utc>) -> WeekBounds {
    WeekBounds::containing(instant.date_naive())
}

/// Week containing `instant`, in the named zone when one is given, else UTC
pub fn week_bounds(instant: DateTime<Utc>, timezone: Option<&str>) -> Result<WeekBounds, StatsError> {
    match timezone {
        Some(name) => Ok(week_bounds_in(instant, &parse_timezone(name)?)),
        None => Ok(week_bounds_utc(instant)),
    }
}

/// Today's date in the named zone when one is given, else UTC
pub fn today(instant: DateTime<Utc>, timezone: Option<&str>) -> Result<NaiveDate, StatsError> {
    match timezone {
        Some(name) => Ok(local_date(instant, &parse_timezone(name)?)),
        None => Ok(instant.date_naive()),
    }
}
