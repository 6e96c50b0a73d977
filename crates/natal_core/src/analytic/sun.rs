//! Apparent geocentric Sun, low-precision solar theory.
//!
//! Source: Meeus, _Astronomical Algorithms_ 2nd ed., chapter 25.
//! Accuracy about 0.01° in longitude.

/// Apparent longitude of date (degrees, [0, 360)) and radius vector (AU).
pub fn sun_apparent(t: f64) -> (f64, f64) {
    let l0 = 280.466_46 + t * (36_000.769_83 + t * 0.000_303_2);
    let m = 357.529_11 + t * (35_999.050_29 - t * 0.000_153_7);
    let e = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);

    let mr = m.to_radians();
    let c = (1.914_602 - t * (0.004_817 + t * 0.000_014)) * mr.sin()
        + (0.019_993 - t * 0.000_101) * (2.0 * mr).sin()
        + 0.000_289 * (3.0 * mr).sin();

    let true_lon = l0 + c;
    let nu = (m + c).to_radians();
    let radius = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    // Nutation in longitude and annual aberration.
    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent = true_lon - 0.005_69 - 0.004_78 * omega.sin();

    (natal_frames::wrap_360(apparent), radius)
}
