//! Ecliptic ↔ equatorial rotation about the x-axis (the equinox line).

use crate::spherical::wrap_360;

/// Right ascension and declination in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    /// Right ascension, range [0, 360).
    pub ra_deg: f64,
    /// Declination, range [-90, 90].
    pub dec_deg: f64,
}

/// Ecliptic longitude/latitude to right ascension/declination.
///
/// Source: Meeus, _Astronomical Algorithms_ 2nd ed., eq. 13.3 and 13.4.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> EquatorialCoords {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();
    let tb = sb / cb;

    let ra = (sl * ce - tb * se).atan2(cl);
    let dec = (sb * ce + cb * se * sl).clamp(-1.0, 1.0).asin();
    EquatorialCoords {
        ra_deg: wrap_360(ra.to_degrees()),
        dec_deg: dec.to_degrees(),
    }
}

/// Right ascension/declination to ecliptic `(lon_deg, lat_deg)`.
pub fn equatorial_to_ecliptic(eq: EquatorialCoords, obliquity_deg: f64) -> (f64, f64) {
    let (sa, ca) = eq.ra_deg.to_radians().sin_cos();
    let (sd, cd) = eq.dec_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();
    let td = sd / cd;

    let lon = (sa * ce + td * se).atan2(ca);
    let lat = (sd * ce - cd * se * sa).clamp(-1.0, 1.0).asin();
    (wrap_360(lon.to_degrees()), lat.to_degrees())
}

/// Rotate an ecliptic Cartesian vector into the equatorial frame.
pub fn ecliptic_vec_to_equatorial(v: &[f64; 3], obliquity_deg: f64) -> [f64; 3] {
    let (se, ce) = obliquity_deg.to_radians().sin_cos();
    [v[0], ce * v[1] - se * v[2], se * v[1] + ce * v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn equinox_maps_to_origin() {
        let eq = ecliptic_to_equatorial(0.0, 0.0, 23.44);
        assert!(eq.ra_deg.abs() < EPS || (eq.ra_deg - 360.0).abs() < EPS);
        assert!(eq.dec_deg.abs() < EPS);
    }

    #[test]
    fn solstice_declination_equals_obliquity() {
        let eq = ecliptic_to_equatorial(90.0, 0.0, 23.44);
        assert!((eq.ra_deg - 90.0).abs() < EPS);
        assert!((eq.dec_deg - 23.44).abs() < EPS);
    }

    #[test]
    fn meeus_example_13a() {
        // Pollux: λ = 113.215630°, β = 6.684170°, ε = 23.4392911°
        // → α = 116.328942°, δ = 28.026183°
        let eq = ecliptic_to_equatorial(113.215_630, 6.684_170, 23.439_291_1);
        assert!((eq.ra_deg - 116.328_942).abs() < 1e-5, "ra = {}", eq.ra_deg);
        assert!((eq.dec_deg - 28.026_183).abs() < 1e-5, "dec = {}", eq.dec_deg);
    }

    #[test]
    fn roundtrip() {
        let eq = ecliptic_to_equatorial(237.5, -4.2, 23.44);
        let (lon, lat) = equatorial_to_ecliptic(eq, 23.44);
        assert!((lon - 237.5).abs() < EPS);
        assert!((lat + 4.2).abs() < EPS);
    }

    #[test]
    fn vector_rotation_matches_angles() {
        let lon = 200.0_f64.to_radians();
        let v = [lon.cos(), lon.sin(), 0.0];
        let e = ecliptic_vec_to_equatorial(&v, 23.44);
        let eq = ecliptic_to_equatorial(200.0, 0.0, 23.44);
        assert!((e[2].asin().to_degrees() - eq.dec_deg).abs() < EPS);
        let ra = wrap_360(e[1].atan2(e[0]).to_degrees());
        assert!((ra - eq.ra_deg).abs() < EPS);
    }
}
