//! Time handling for natal-chart computations.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - `UtcTime`, the validated UTC instant used throughout the workspace
//! - ΔT (TT − UT) estimates for converting UTC to Terrestrial Time
//! - Greenwich and local sidereal time

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;
pub mod utc_time;

pub use delta_t::{decimal_year, delta_t_seconds};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, J2000_JD, SECONDS_PER_DAY, calendar_to_jd,
    centuries_since_j2000, jd_to_calendar, years_since_j2000,
};
pub use sidereal::{earth_rotation_angle_deg, gmst_deg, local_sidereal_deg};
pub use utc_time::UtcTime;
