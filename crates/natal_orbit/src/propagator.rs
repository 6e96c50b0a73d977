//! Minor-body positions from fixed Keplerian elements.
//!
//! Mean anomaly drifts linearly from the element epoch, so the result is
//! an osculating two-body approximation. Planetary perturbations are not
//! modelled; for centaurs this is good to a degree or two over a century.

use natal_frames::{
    SphericalCoords, cartesian_to_spherical, general_precession_longitude_deg,
    precess_longitude_from_j2000, spherical_to_cartesian,
};
use natal_time::{DAYS_PER_JULIAN_YEAR, UtcTime, centuries_since_j2000};
use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;
use crate::error::OrbitError;
use crate::kepler::{KeplerConfig, KeplerSolution, solve_kepler, true_anomaly_rad};

/// Heliocentric result of a propagation, in the J2000 ecliptic frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    /// Ecliptic longitude, [0, 360).
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub radius_au: f64,
    pub position_au: [f64; 3],
    pub kepler: KeplerSolution,
}

impl Propagation {
    pub fn converged(&self) -> bool {
        self.kepler.converged
    }
}

/// Geocentric ecliptic position of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub distance_au: f64,
    pub heliocentric: Propagation,
}

/// Place a point of the orbit plane into the ecliptic frame.
///
/// `u_rad` is the argument of latitude (ω + ν).
pub fn orbit_to_ecliptic(radius: f64, u_rad: f64, node_rad: f64, incl_rad: f64) -> [f64; 3] {
    let (su, cu) = u_rad.sin_cos();
    let (sn, cn) = node_rad.sin_cos();
    let (si, ci) = incl_rad.sin_cos();
    [
        radius * (cn * cu - sn * su * ci),
        radius * (sn * cu + cn * su * ci),
        radius * su * si,
    ]
}

/// Which longitude a chart reports for a minor body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinorBodyFrame {
    /// Seen from the Earth, equinox of date.
    #[default]
    Geocentric,
    /// Seen from the Sun, J2000 ecliptic.
    Heliocentric,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MinorBodyPropagator {
    config: KeplerConfig,
}

impl MinorBodyPropagator {
    pub fn new(config: KeplerConfig) -> Result<Self, OrbitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KeplerConfig {
        &self.config
    }

    /// Heliocentric ecliptic longitude of the body at a UTC instant.
    pub fn longitude_of(
        &self,
        elements: &OrbitalElements,
        at: &UtcTime,
    ) -> Result<Propagation, OrbitError> {
        self.propagate(elements, at.to_jd_tt())
    }

    /// Heliocentric position at a TT Julian Date.
    pub fn propagate(
        &self,
        elements: &OrbitalElements,
        jd_tt: f64,
    ) -> Result<Propagation, OrbitError> {
        elements.validate()?;

        let years = (jd_tt - elements.epoch_jd) / DAYS_PER_JULIAN_YEAR;
        let m = elements.mean_anomaly_after(years).to_radians();
        let e = elements.eccentricity;

        let kepler = solve_kepler(m, e, &self.config);
        let ea = kepler.eccentric_anomaly_rad;
        let nu = true_anomaly_rad(e, ea);
        let radius = elements.semi_major_axis_au * (1.0 - e * ea.cos());

        let u = nu + elements.argument_of_perihelion_deg.to_radians();
        let position_au = orbit_to_ecliptic(
            radius,
            u,
            elements.longitude_of_ascending_node_deg.to_radians(),
            elements.inclination_deg.to_radians(),
        );
        let sph = cartesian_to_spherical(&position_au);

        Ok(Propagation {
            longitude_deg: sph.lon_deg,
            latitude_deg: sph.lat_deg,
            radius_au: radius,
            position_au,
            kepler,
        })
    }

    /// Geocentric position of date, given the geocentric Sun of date.
    ///
    /// The Earth's heliocentric vector is the negated Sun vector; both are
    /// brought to the J2000 ecliptic before differencing and the result is
    /// precessed back to the equinox of date.
    pub fn geocentric(
        &self,
        elements: &OrbitalElements,
        jd_tt: f64,
        sun_of_date: &SphericalCoords,
    ) -> Result<GeocentricPosition, OrbitError> {
        let helio = self.propagate(elements, jd_tt)?;
        let t = centuries_since_j2000(jd_tt);

        let sun_j2000 = SphericalCoords {
            lon_deg: sun_of_date.lon_deg - general_precession_longitude_deg(t),
            ..*sun_of_date
        };
        let sun = spherical_to_cartesian(&sun_j2000);
        let body = helio.position_au;
        let geo = [body[0] + sun[0], body[1] + sun[1], body[2] + sun[2]];
        let sph = cartesian_to_spherical(&geo);

        Ok(GeocentricPosition {
            lon_deg: precess_longitude_from_j2000(sph.lon_deg, t),
            lat_deg: sph.lat_deg,
            distance_au: sph.distance,
            heliocentric: helio,
        })
    }
}
