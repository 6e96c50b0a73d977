//! Types for lunar node crossing search.

use serde::{Deserialize, Serialize};

/// Which way the Moon crosses the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Latitude goes from south to north. The Moon sits on the North Node.
    Ascending,
    /// Latitude goes from north to south. The Moon sits on the South Node.
    Descending,
}

impl NodeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// A lunar node crossing (the Moon's ecliptic latitude passes through zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeEvent {
    /// Event time as Julian Date (TT).
    pub jd_tt: f64,
    pub kind: NodeKind,
    /// Moon's ecliptic longitude at the crossing, degrees [0, 360).
    pub moon_longitude_deg: f64,
}

impl NodeEvent {
    /// North Node longitude implied by this crossing.
    pub fn north_longitude_deg(&self) -> f64 {
        match self.kind {
            NodeKind::Ascending => self.moon_longitude_deg,
            NodeKind::Descending => (self.moon_longitude_deg + 180.0).rem_euclid(360.0),
        }
    }
}

/// Search direction in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Configuration for node crossing search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSearchConfig {
    /// Coarse scan step size in days (default 0.5).
    pub step_days: f64,
    /// How far back the locator looks for a crossing, in days (default 30).
    pub window_days: f64,
    /// Maximum bisection iterations (default 50).
    pub max_iterations: u32,
    /// Convergence threshold in days (default 1e-8, ~0.86 ms).
    pub convergence_days: f64,
}

impl Default for NodeSearchConfig {
    fn default() -> Self {
        Self {
            step_days: 0.5,
            window_days: 30.0,
            max_iterations: 50,
            convergence_days: 1e-8,
        }
    }
}

/// Shortest window that always holds a crossing: nodes come every
/// ~13.6 days, a full draconic month is ~27.2 days.
pub const MIN_WINDOW_DAYS: f64 = 28.0;

impl NodeSearchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        // Half a node interval; a larger step can hop over two crossings.
        if self.step_days > 6.0 {
            return Err("step_days must not exceed 6 days");
        }
        if !self.window_days.is_finite() || self.window_days < MIN_WINDOW_DAYS {
            return Err("window_days must be at least 28");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_days.is_finite() || self.convergence_days <= 0.0 {
            return Err("convergence_days must be positive");
        }
        Ok(())
    }
}
