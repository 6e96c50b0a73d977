//! Heliocentric Keplerian element sets.

use natal_frames::wrap_360;
use natal_time::J2000_JD;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Classical elements referred to the J2000 ecliptic and equinox.
///
/// Angles are in degrees. The mean anomaly is given at `epoch_jd` (TT),
/// which defaults to J2000.0 when omitted from a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_anomaly_at_epoch_deg: f64,
    pub longitude_of_ascending_node_deg: f64,
    pub argument_of_perihelion_deg: f64,
    pub orbital_period_years: f64,
    #[serde(default = "default_epoch")]
    pub epoch_jd: f64,
}

fn default_epoch() -> f64 {
    J2000_JD
}

impl OrbitalElements {
    /// 2060 Chiron, osculating elements at J2000.0.
    pub const CHIRON: Self = Self {
        semi_major_axis_au: 13.6487,
        eccentricity: 0.38313,
        inclination_deg: 6.9357,
        mean_anomaly_at_epoch_deg: 27.70,
        longitude_of_ascending_node_deg: 209.3836,
        argument_of_perihelion_deg: 339.2537,
        orbital_period_years: 50.42,
        epoch_jd: J2000_JD,
    };

    /// Reject element sets the propagator cannot handle.
    ///
    /// Only bound orbits are supported: `0 ≤ e < 1`.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let angles = [
            self.inclination_deg,
            self.mean_anomaly_at_epoch_deg,
            self.longitude_of_ascending_node_deg,
            self.argument_of_perihelion_deg,
        ];
        if !self.eccentricity.is_finite() || !(0.0..1.0).contains(&self.eccentricity) {
            return Err(OrbitError::InvalidOrbitalElements(
                "eccentricity must be in [0, 1)",
            ));
        }
        if !self.semi_major_axis_au.is_finite() || self.semi_major_axis_au <= 0.0 {
            return Err(OrbitError::InvalidOrbitalElements(
                "semi-major axis must be positive",
            ));
        }
        if !self.orbital_period_years.is_finite() || self.orbital_period_years <= 0.0 {
            return Err(OrbitError::InvalidOrbitalElements(
                "orbital period must be positive",
            ));
        }
        if angles.iter().any(|a| !a.is_finite()) || !self.epoch_jd.is_finite() {
            return Err(OrbitError::InvalidOrbitalElements("angles must be finite"));
        }
        Ok(())
    }

    /// Mean motion in degrees per Julian year.
    pub fn mean_motion_deg_per_year(&self) -> f64 {
        360.0 / self.orbital_period_years
    }

    /// Mean anomaly in degrees, [0, 360), after `years` since the epoch.
    pub fn mean_anomaly_after(&self, years: f64) -> f64 {
        let m = self.mean_anomaly_at_epoch_deg + self.mean_motion_deg_per_year() * years;
        wrap_360(m)
    }
}
