//! Two-body Keplerian propagation.
//!
//! Bodies without a dedicated theory (Chiron and other centaurs,
//! asteroids) are placed by solving Kepler's equation on a fixed set of
//! heliocentric elements. The same solver backs the analytic planetary
//! theory in `natal_core`.

pub mod elements;
pub mod error;
pub mod kepler;
pub mod propagator;

pub use elements::OrbitalElements;
pub use error::OrbitError;
pub use kepler::{KeplerConfig, KeplerSolution, solve_kepler, true_anomaly_rad};
pub use propagator::{
    GeocentricPosition, MinorBodyFrame, MinorBodyPropagator, Propagation, orbit_to_ecliptic,
};
