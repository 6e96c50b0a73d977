//! Cartesian ↔ spherical conversion and small vector helpers.

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, range [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, range [-90, 90].
    pub lat_deg: f64,
    /// Distance from origin, in the units of the input vector.
    pub distance: f64,
}

impl SphericalCoords {
    pub fn to_cartesian(&self) -> [f64; 3] {
        spherical_to_cartesian(self)
    }
}

/// Reduce an angle to [0, 360).
///
/// `rem_euclid` alone rounds tiny negative angles up to exactly 360.
pub fn wrap_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
///
/// The zero vector maps to all-zero coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let r = norm(xyz);
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: wrap_360(xyz[1].atan2(xyz[0]).to_degrees()),
        lat_deg: (xyz[2] / r).clamp(-1.0, 1.0).asin().to_degrees(),
        distance: r,
    }
}

/// Convert spherical coordinates back to Cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let (sl, cl) = s.lon_deg.to_radians().sin_cos();
    let (sb, cb) = s.lat_deg.to_radians().sin_cos();
    [s.distance * cb * cl, s.distance * cb * sl, s.distance * sb]
}

pub fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// `a − b`, e.g. a heliocentric body minus the heliocentric Earth.
pub fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn axes() {
        let x = cartesian_to_spherical(&[1.5, 0.0, 0.0]);
        assert!(x.lon_deg.abs() < EPS && x.lat_deg.abs() < EPS);
        assert!((x.distance - 1.5).abs() < EPS);

        let y = cartesian_to_spherical(&[0.0, 1.5, 0.0]);
        assert!((y.lon_deg - 90.0).abs() < EPS);

        let neg_x = cartesian_to_spherical(&[-1.5, 0.0, 0.0]);
        assert!((neg_x.lon_deg - 180.0).abs() < EPS);

        let z = cartesian_to_spherical(&[0.0, 0.0, 1.5]);
        assert!((z.lat_deg - 90.0).abs() < EPS);
    }

    #[test]
    fn third_quadrant_longitude_positive() {
        let s = cartesian_to_spherical(&[-1.0, -1.0, 0.0]);
        assert!((s.lon_deg - 225.0).abs() < EPS);
    }

    #[test]
    fn wrap_stays_below_360() {
        assert_eq!(wrap_360(-1e-14), 0.0);
        assert_eq!(wrap_360(360.0), 0.0);
        assert!((wrap_360(-90.0) - 270.0).abs() < 1e-12);
        assert!((wrap_360(725.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_negative_longitude_folds_to_zero() {
        let s = cartesian_to_spherical(&[1.0, -1e-17, 0.0]);
        assert_eq!(s.lon_deg, 0.0);
        let s = cartesian_to_spherical(&[1.0, -1e-9, 0.0]);
        assert!(s.lon_deg < 360.0 && s.lon_deg > 359.0);
    }

    #[test]
    fn roundtrip() {
        let xyz = [5.11, -1.92, 0.37];
        let back = cartesian_to_spherical(&xyz).to_cartesian();
        for i in 0..3 {
            assert!((xyz[i] - back[i]).abs() < EPS, "axis {i}: {} != {}", xyz[i], back[i]);
        }
    }

    #[test]
    fn zero_vector() {
        assert_eq!(cartesian_to_spherical(&[0.0, 0.0, 0.0]).distance, 0.0);
    }

    #[test]
    fn sub_and_norm() {
        let d = sub(&[3.0, 4.0, 12.0], &[0.0, 0.0, 0.0]);
        assert_eq!(norm(&d), 13.0);
    }
}
