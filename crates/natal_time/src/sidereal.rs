//! Sidereal time for chart angles and astrocartography meridians.
//!
//! Inputs are UT Julian Dates. UTC stands in for UT1; the difference is
//! under 0.9 s, about 0.004° of rotation, well inside chart precision.

use crate::julian::{DAYS_PER_JULIAN_CENTURY, J2000_JD};

/// Earth Rotation Angle in degrees [0, 360) (IERS Conventions 2010, eq. 5.15).
pub fn earth_rotation_angle_deg(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    (360.0 * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du)).rem_euclid(360.0)
}

/// Greenwich Mean Sidereal Time in degrees [0, 360).
///
/// ERA plus the equinox-based polynomial of Capitaine et al. (2003),
/// evaluated in arcseconds with T in Julian centuries of UT.
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    let arcsec = 0.014_506
        + t * (4_612.156_534
            + t * (1.391_581_7 + t * (-0.000_000_44 + t * (-0.000_029_956 - t * 0.000_000_036_8))));
    (earth_rotation_angle_deg(jd_ut) + arcsec / 3600.0).rem_euclid(360.0)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_deg(jd_ut: f64, lng_east_deg: f64) -> f64 {
    (gmst_deg(jd_ut) + lng_east_deg).rem_euclid(360.0)
}
