//! The ephemeris contract.

use std::sync::Arc;

use crate::body::Body;
use crate::error::EngineError;

/// Geocentric ecliptic position referred to the mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    /// Longitude in degrees, range [0, 360).
    pub lon_deg: f64,
    /// Latitude in degrees, range [-90, 90].
    pub lat_deg: f64,
    pub distance_au: f64,
}

/// Source of geocentric body positions.
///
/// Implementations are pure functions of `(body, jd_tt)` and must be
/// shareable across threads.
pub trait EphemerisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Position of `body` at the TT Julian Date `jd_tt`.
    fn ecliptic_position(&self, body: Body, jd_tt: f64) -> Result<EclipticPosition, EngineError>;

    /// Apparent longitude motion in degrees per day, by central difference
    /// over ±`half_span_days`. Negative means retrograde.
    fn longitude_speed(
        &self,
        body: Body,
        jd_tt: f64,
        half_span_days: f64,
    ) -> Result<f64, EngineError> {
        if !half_span_days.is_finite() || half_span_days <= 0.0 {
            return Err(EngineError::InvalidQuery("half_span_days must be positive"));
        }
        let before = self.ecliptic_position(body, jd_tt - half_span_days)?;
        let after = self.ecliptic_position(body, jd_tt + half_span_days)?;
        let delta = (after.lon_deg - before.lon_deg + 540.0).rem_euclid(360.0) - 180.0;
        Ok(delta / (2.0 * half_span_days))
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn ecliptic_position(&self, body: Body, jd_tt: f64) -> Result<EclipticPosition, EngineError> {
        (**self).ecliptic_position(body, jd_tt)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn ecliptic_position(&self, body: Body, jd_tt: f64) -> Result<EclipticPosition, EngineError> {
        (**self).ecliptic_position(body, jd_tt)
    }
}
