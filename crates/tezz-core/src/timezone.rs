//! Timezone handling for calendar-day derivation
//!
//! Every place that turns a lesson timestamp into a calendar date goes
//! through a [`TimezoneConfig`], so the zone is explicit and injectable
//! instead of being whatever the process happens to run in.

use crate::error::{Result, TezzError};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Timezone used to derive calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneConfig {
    /// The timezone to use for date operations
    pub tz: Tz,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            tz: detect_local_timezone(),
        }
    }
}

impl TimezoneConfig {
    /// Fixed zone, mostly useful in tests
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from the `--timezone` / `--utc` command line flags
    ///
    /// `--utc` wins over an explicit zone name; with neither flag the
    /// system zone is detected.
    pub fn from_cli(timezone: Option<&str>, use_utc: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::new(Tz::UTC));
        }

        match timezone {
            Some(name) => Tz::from_str(name).map(Self::new).map_err(|_| {
                TezzError::InvalidTimezone(format!(
                    "'{name}'. Use an IANA name like 'Asia/Bishkek', 'Europe/Berlin' or 'UTC'"
                ))
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn is_utc(&self) -> bool {
        self.tz == Tz::UTC
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc() { "UTC" } else { self.tz.name() }
    }

    /// Calendar date of an instant in this zone
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        local_date(instant, &self.tz)
    }

    /// Today's date in this zone for the given "now"
    pub fn today(&self, now: &DateTime<Utc>) -> NaiveDate {
        self.local_date(now)
    }
}

/// Truncate an instant to its calendar date in `tz`
pub fn local_date(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Whether `date` is the current day in `tz`
pub fn is_today(date: NaiveDate, now: &DateTime<Utc>, tz: &Tz) -> bool {
    local_date(now, tz) == date
}

/// Detect the system's local timezone
///
/// `TZ` takes precedence, then the platform zone via `iana-time-zone`.
/// Anything unparseable falls back to UTC.
pub fn detect_local_timezone() -> Tz {
    if let Ok(name) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&name)
    {
        debug!("Using timezone from TZ environment variable: {}", name);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => Tz::from_str(&name).unwrap_or_else(|_| {
            debug!("Unrecognized system timezone '{}', falling back to UTC", name);
            Tz::UTC
        }),
        Err(e) => {
            debug!("Could not detect local timezone: {:?}, falling back to UTC", e);
            Tz::UTC
        }
    }
}
