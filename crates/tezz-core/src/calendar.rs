//! Time-window calculator
//!
//! Works on calendar dates only. A reference date plus a [`Granularity`]
//! decides which days a schedule view shows, and [`navigate`] moves the
//! reference date one view backwards or forwards.
//!
//! # Examples
//!
//! ```
//! use tezz_core::calendar::{days_in_week, navigate, Direction, Granularity};
//! use chrono::{Datelike, NaiveDate, Weekday};
//!
//! let wednesday = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
//! let next = navigate(wednesday, Granularity::Week, Direction::Next).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
//!
//! let week = days_in_week(next).unwrap();
//! assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
//! assert_eq!(week[0].weekday(), Weekday::Mon);
//! ```

use crate::error::{Result, TezzError};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display resolution of the schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!("Invalid view: {s} (expected day, week or month)")),
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prev" | "previous" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            _ => Err(format!("Invalid direction: {s} (expected prev or next)")),
        }
    }
}

/// The days a view covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ViewWindow {
    Day { date: NaiveDate },
    Week { days: [NaiveDate; 7] },
    /// Month views only carry the month; there is no day grid
    Month { year: i32, month: u32 },
}

impl ViewWindow {
    pub fn new(reference: NaiveDate, granularity: Granularity) -> Result<Self> {
        Ok(match granularity {
            Granularity::Day => Self::Day { date: reference },
            Granularity::Week => Self::Week {
                days: days_in_week(reference)?,
            },
            Granularity::Month => Self::Month {
                year: reference.year(),
                month: reference.month(),
            },
        })
    }

    /// Individual days shown, empty for month views
    pub fn days(&self) -> &[NaiveDate] {
        match self {
            Self::Day { date } => std::slice::from_ref(date),
            Self::Week { days } => days,
            Self::Month { .. } => &[],
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Day { .. } => Granularity::Day,
            Self::Week { .. } => Granularity::Week,
            Self::Month { .. } => Granularity::Month,
        }
    }
}

/// The Monday-to-Sunday week containing `reference`
///
/// Sunday belongs to the week that started six days earlier. Weeks that
/// would run past the first or last representable date are `InvalidDate`.
pub fn days_in_week(reference: NaiveDate) -> Result<[NaiveDate; 7]> {
    let out_of_range = || {
        TezzError::InvalidDate(format!(
            "the week of {reference} is outside the calendar range"
        ))
    };

    let back = u64::from(reference.weekday().num_days_from_monday());
    let monday = reference
        .checked_sub_days(Days::new(back))
        .ok_or_else(out_of_range)?;
    // Sunday must exist before walking the week
    monday
        .checked_add_days(Days::new(6))
        .ok_or_else(out_of_range)?;

    let mut days = [monday; 7];
    for (day, next) in days.iter_mut().zip(monday.iter_days()) {
        *day = next;
    }
    Ok(days)
}

/// Move the reference date one view in `direction`
///
/// Month steps clamp the day to the end of the target month
/// (January 31st plus one month is the last day of February). The web
/// dashboard rolls over into the following month instead (March 2nd);
/// the clamped date is kept on purpose.
pub fn navigate(
    reference: NaiveDate,
    granularity: Granularity,
    direction: Direction,
) -> Result<NaiveDate> {
    let shifted = match (granularity, direction) {
        (Granularity::Day, Direction::Next) => reference.checked_add_days(Days::new(1)),
        (Granularity::Day, Direction::Prev) => reference.checked_sub_days(Days::new(1)),
        (Granularity::Week, Direction::Next) => reference.checked_add_days(Days::new(7)),
        (Granularity::Week, Direction::Prev) => reference.checked_sub_days(Days::new(7)),
        (Granularity::Month, Direction::Next) => reference.checked_add_months(Months::new(1)),
        (Granularity::Month, Direction::Prev) => reference.checked_sub_months(Months::new(1)),
    };

    shifted.ok_or_else(|| {
        TezzError::InvalidDate(format!(
            "cannot move {reference} by one {granularity}: out of calendar range"
        ))
    })
}

/// Apply [`navigate`] `steps` times; negative steps go backwards
pub fn navigate_by(reference: NaiveDate, granularity: Granularity, steps: i32) -> Result<NaiveDate> {
    let direction = if steps < 0 {
        Direction::Prev
    } else {
        Direction::Next
    };

    (0..steps.unsigned_abs()).try_fold(reference, |date, _| navigate(date, granularity, direction))
}
