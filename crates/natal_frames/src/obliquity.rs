//! Mean obliquity of the ecliptic.
//!
//! Source: IAU 2006 (Capitaine et al. 2003, eq. 39). Public domain.

/// Mean obliquity at J2000.0: 84381.406″.
pub const OBLIQUITY_J2000_DEG: f64 = 84_381.406 / 3600.0;

/// Mean obliquity of date in degrees.
///
/// `t` is Julian centuries of TT since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 84_381.406
        + t * (-46.836_769
            + t * (-0.000_183_1 + t * (0.002_003_40 + t * (-0.000_000_576 - t * 0.000_000_043_4))));
    arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_value() {
        assert!((mean_obliquity_deg(0.0) - 23.439_279_4).abs() < 1e-7);
        assert_eq!(mean_obliquity_deg(0.0), OBLIQUITY_J2000_DEG);
    }

    #[test]
    fn decreases_about_47_arcsec_per_century() {
        let drop = (mean_obliquity_deg(0.0) - mean_obliquity_deg(1.0)) * 3600.0;
        assert!((drop - 46.84).abs() < 0.01, "drop = {drop}″");
    }
}
