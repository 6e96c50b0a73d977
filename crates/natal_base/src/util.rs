//! Angle helpers shared by the zodiac code.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    natal_frames::wrap_360(deg)
}

/// Signed shortest rotation from `from` to `to`, in (−180, 180].
pub fn angular_difference(from: f64, to: f64) -> f64 {
    let d = normalize_360(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}
