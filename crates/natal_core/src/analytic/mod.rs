//! Built-in provider assembled from closed-form theories.

pub mod moon;
pub mod planets;
pub mod sun;

use log::debug;
use natal_orbit::KeplerConfig;
use natal_time::centuries_since_j2000;

use crate::body::Body;
use crate::error::EngineError;
use crate::provider::{EclipticPosition, EphemerisProvider};

/// 3000 BC Jan 1 and 3000 AD Jan 1; the linear element rates are
/// meaningless beyond.
const MIN_JD_TT: f64 = 625_673.5;
const MAX_JD_TT: f64 = 2_816_787.5;

/// Planetary element rates are fitted to 1800–2050.
const FIT_START_JD: f64 = 2_378_496.5;
const FIT_END_JD: f64 = 2_469_807.5;

/// Low-precision geocentric ephemeris needing no data files.
///
/// - Sun: Meeus solar theory, apparent longitude.
/// - Moon: truncated Montenbruck–Pfleger series.
/// - Planets: Standish approximate elements, light-time corrected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris {
    kepler: KeplerConfig,
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kepler_config(kepler: KeplerConfig) -> Result<Self, EngineError> {
        kepler
            .validate()
            .map_err(|_| EngineError::InvalidConfig("invalid Kepler solver settings"))?;
        Ok(Self { kepler })
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn ecliptic_position(&self, body: Body, jd_tt: f64) -> Result<EclipticPosition, EngineError> {
        if !jd_tt.is_finite() {
            return Err(EngineError::InvalidQuery("jd_tt must be finite"));
        }
        if !(MIN_JD_TT..=MAX_JD_TT).contains(&jd_tt) {
            return Err(EngineError::EpochOutOfRange { jd_tt });
        }
        if !(FIT_START_JD..=FIT_END_JD).contains(&jd_tt) && !matches!(body, Body::Sun | Body::Moon)
        {
            debug!("{} at JD {jd_tt} is outside the 1800-2050 element fit", body.name());
        }

        let t = centuries_since_j2000(jd_tt);
        match body {
            Body::Sun => {
                let (lon_deg, distance_au) = sun::sun_apparent(t);
                Ok(EclipticPosition {
                    lon_deg,
                    lat_deg: 0.0,
                    distance_au,
                })
            }
            Body::Moon => {
                let (lon_deg, lat_deg, distance_au) = moon::moon_position(t);
                Ok(EclipticPosition {
                    lon_deg,
                    lat_deg,
                    distance_au,
                })
            }
            _ => planets::planet_position(body, t, &self.kepler)
                .ok_or(EngineError::UnsupportedBody(body)),
        }
    }
}
