//! Newton–Raphson solution of Kepler's equation `E − e·sin E = M`.

use std::f64::consts::TAU;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Iteration controls for [`solve_kepler`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerConfig {
    /// Stop when the Newton correction falls below this (radians).
    pub tolerance_rad: f64,
    /// Hard iteration cap.
    pub max_iterations: u32,
}

impl Default for KeplerConfig {
    fn default() -> Self {
        Self {
            tolerance_rad: 1e-6,
            max_iterations: 32,
        }
    }
}

impl KeplerConfig {
    pub fn validate(&self) -> Result<(), OrbitError> {
        if !self.tolerance_rad.is_finite() || self.tolerance_rad <= 0.0 {
            return Err(OrbitError::InvalidConfig("tolerance_rad must be positive"));
        }
        if self.max_iterations < 10 {
            return Err(OrbitError::InvalidConfig("max_iterations must be >= 10"));
        }
        Ok(())
    }
}

/// Outcome of a Kepler solve.
///
/// `converged == false` means the cap was reached and `eccentric_anomaly_rad`
/// is the best estimate, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly_rad: f64,
    pub iterations: u32,
    pub converged: bool,
    /// Magnitude of the last Newton correction.
    pub last_correction_rad: f64,
}

/// Solve for the eccentric anomaly, starting from `E₀ = M`.
///
/// `mean_anomaly_rad` may be any finite value; it is reduced to [0, 2π).
/// Callers guarantee `0 ≤ e < 1`.
pub fn solve_kepler(mean_anomaly_rad: f64, e: f64, config: &KeplerConfig) -> KeplerSolution {
    let m = mean_anomaly_rad.rem_euclid(TAU);
    let mut ea = m;
    let mut delta = f64::INFINITY;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let f = ea - e * ea.sin() - m;
        let fp = 1.0 - e * ea.cos();
        delta = f / fp;
        ea -= delta;
        iterations += 1;
        if delta.abs() < config.tolerance_rad {
            return KeplerSolution {
                eccentric_anomaly_rad: ea,
                iterations,
                converged: true,
                last_correction_rad: delta.abs(),
            };
        }
    }

    warn!(
        "Kepler solve hit the {} iteration cap (e = {e}, M = {m:.6} rad, |ΔE| = {:.3e})",
        config.max_iterations,
        delta.abs()
    );
    KeplerSolution {
        eccentric_anomaly_rad: ea,
        iterations,
        converged: false,
        last_correction_rad: delta.abs(),
    }
}

/// True anomaly from the eccentric anomaly, half-angle form.
pub fn true_anomaly_rad(e: f64, eccentric_anomaly_rad: f64) -> f64 {
    let half = eccentric_anomaly_rad / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}
