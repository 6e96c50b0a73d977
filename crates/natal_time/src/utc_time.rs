//! UTC calendar date/time with sub-second precision.
//!
//! `UtcTime` is the instant type accepted by every public computation in
//! the workspace. It is validated on construction and converts to Julian
//! Dates on either the UTC or the TT scale.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::delta_t::{decimal_year, delta_t_seconds};
use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    /// Build a validated instant.
    ///
    /// `second` may reach 60.x to admit a leap second.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        if hour > 23 {
            return Err(TimeError::InvalidDate("hour must be in 0..=23"));
        }
        if minute > 59 {
            return Err(TimeError::InvalidDate("minute must be in 0..=59"));
        }
        if !second.is_finite() || !(0.0..61.0).contains(&second) {
            return Err(TimeError::InvalidDate("second must be in [0, 61)"));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    fn day_fraction(&self) -> f64 {
        self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY
    }

    /// Julian Date on the UTC scale (used as UT1 for sidereal time).
    pub fn to_jd_utc(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day_fraction())
    }

    /// ΔT applied to this instant, in seconds.
    pub fn delta_t_seconds(&self) -> f64 {
        delta_t_seconds(decimal_year(self.year, self.month))
    }

    /// Julian Date on the Terrestrial Time scale, the argument of the
    /// analytic ephemerides.
    pub fn to_jd_tt(&self) -> f64 {
        self.to_jd_utc() + self.delta_t_seconds() / SECONDS_PER_DAY
    }

    /// Convert a UTC Julian Date back to a calendar instant.
    pub fn from_jd_utc(jd_utc: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd_utc);
        let day = day_frac.floor() as u32;
        // Microsecond rounding keeps 01:28:00 from decoding as 01:27:59.99999.
        let total_seconds = ((day_frac.fract() * SECONDS_PER_DAY * 1e6).round() / 1e6)
            .min(SECONDS_PER_DAY - 1e-6);
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour: hour.min(23),
            minute: minute.min(59),
            second,
        }
    }

    /// Convert a TT Julian Date back to a UTC calendar instant.
    pub fn from_jd_tt(jd_tt: f64) -> Self {
        let (year, month, _) = jd_to_calendar(jd_tt);
        let dt = delta_t_seconds(decimal_year(year, month));
        Self::from_jd_utc(jd_tt - dt / SECONDS_PER_DAY)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl From<DateTime<Utc>> for UtcTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second() as f64 + dt.nanosecond() as f64 / 1e9,
        }
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Accepts RFC 3339 (`1994-02-01T01:28:00Z`, any offset), a naive
    /// `YYYY-MM-DDTHH:MM:SS` taken as UTC, or a bare `YYYY-MM-DD` date
    /// taken as midnight UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc).into());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc().into());
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Self::new(date.year(), date.month(), date.day(), 0, 0, 0.0)
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}
