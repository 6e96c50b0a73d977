//! Precession of the equinox along the ecliptic.
//!
//! Orbital elements and the planetary theory are referred to the J2000
//! ecliptic; charts use the equinox of date. The shift between the two is
//! the IAU 2006 general precession in longitude p_A (Capitaine, Wallace &
//! Chapront 2003, Table 1).

use crate::spherical::wrap_360;

/// p_A in arcseconds for `t` Julian centuries (TT) since J2000.0.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    t * (5_028.796_195
        + t * (1.105_434_8 + t * (0.000_079_64 + t * (-0.000_023_857 - t * 0.000_000_038_3))))
}

pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

/// J2000 ecliptic longitude to the mean equinox of date, [0, 360).
///
/// Latitude is left alone: its drift stays under 0.5″ per decade.
pub fn precess_longitude_from_j2000(lon_j2000_deg: f64, t: f64) -> f64 {
    wrap_360(lon_j2000_deg + general_precession_longitude_deg(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanishes_at_epoch() {
        assert_eq!(general_precession_longitude_deg(0.0), 0.0);
        assert_eq!(precess_longitude_from_j2000(123.0, 0.0), 123.0);
    }

    #[test]
    fn about_fifty_arcsec_a_year() {
        let per_year = general_precession_longitude_arcsec(0.01);
        assert!((per_year - 50.29).abs() < 0.05, "{per_year}");
    }

    #[test]
    fn earlier_dates_shift_backward() {
        // 1994 is about -0.06 centuries.
        let lon = precess_longitude_from_j2000(154.71, -0.0592);
        assert!(lon < 154.71 && lon > 154.6, "lon = {lon}");
    }

    #[test]
    fn wraps_past_aries() {
        let lon = precess_longitude_from_j2000(359.9, 0.5);
        assert!((lon - (359.9 + 0.6985 - 360.0)).abs() < 1e-3, "lon = {lon}");
    }
}
