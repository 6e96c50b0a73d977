//! Ascendant and Midheaven.
//!
//! These are the two chart angles needed by derived points. House
//! division is out of scope.

use natal_frames::mean_obliquity_deg;
use natal_time::{centuries_since_j2000, local_sidereal_deg};

use crate::util::normalize_360;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    /// Ecliptic point rising on the eastern horizon.
    pub ascendant: f64,
    /// Ecliptic point culminating on the local meridian.
    pub midheaven: f64,
    /// Local sidereal time in degrees.
    pub lst_deg: f64,
}

/// Ascendant longitude from local sidereal time (degrees), obliquity and
/// geographic latitude.
///
/// Degenerate within the polar circles, where parts of the ecliptic never
/// rise; the formula still returns the eastern intersection.
pub fn ascendant_deg(lst_deg: f64, obliquity_deg: f64, lat_deg: f64) -> f64 {
    let (sl, cl) = lst_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();
    let tp = lat_deg.to_radians().tan();
    normalize_360(cl.atan2(-(sl * ce + tp * se)).to_degrees())
}

pub fn midheaven_deg(lst_deg: f64, obliquity_deg: f64) -> f64 {
    let (sl, cl) = lst_deg.to_radians().sin_cos();
    let ce = obliquity_deg.to_radians().cos();
    normalize_360(sl.atan2(cl * ce).to_degrees())
}

/// Angles for an observer at east longitude `lng_deg`.
///
/// `jd_ut` drives sidereal time, `jd_tt` the obliquity.
pub fn chart_angles(jd_ut: f64, jd_tt: f64, lat_deg: f64, lng_deg: f64) -> ChartAngles {
    let eps = mean_obliquity_deg(centuries_since_j2000(jd_tt));
    let lst_deg = local_sidereal_deg(jd_ut, lng_deg);
    ChartAngles {
        ascendant: ascendant_deg(lst_deg, eps, lat_deg),
        midheaven: midheaven_deg(lst_deg, eps),
        lst_deg,
    }
}
