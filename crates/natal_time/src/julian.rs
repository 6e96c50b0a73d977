//! Julian Date ↔ proleptic Gregorian calendar conversions.
//!
//! Source: Meeus, _Astronomical Algorithms_ 2nd ed., chapter 7.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Calendar date to Julian Date.
///
/// `day` carries the time of day as a fraction (e.g. 1.5 = noon on the 1st).
/// The Gregorian calendar is applied to all dates.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date to calendar `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Julian years elapsed since J2000.0.
pub fn years_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_YEAR
}
