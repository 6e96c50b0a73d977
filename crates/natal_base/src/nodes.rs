//! The Moon's ascending (North) and descending (South) nodes.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// How the North Node longitude is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMode {
    /// Mean node: smooth polynomial regression only.
    #[default]
    Mean,
    /// Node read off the Moon's most recent crossing of the ecliptic.
    Crossing,
}

impl NodeMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Crossing => "crossing",
        }
    }
}

/// North and South node longitudes.
///
/// Only constructible from the North Node, so
/// `south == (north + 180) mod 360` holds exactly for every value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePair {
    north: f64,
    south: f64,
}

impl NodePair {
    pub fn from_north(north_longitude: f64) -> Self {
        let north = normalize_360(north_longitude);
        Self {
            north,
            south: normalize_360(north + 180.0),
        }
    }

    /// Pair whose descending node sits at `south_longitude`.
    pub fn from_south(south_longitude: f64) -> Self {
        Self::from_north(south_longitude + 180.0)
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }
}

/// Mean longitude of the ascending node, degrees [0, 360).
///
/// `t` = Julian centuries of TT since J2000.0.
///
/// Source: Meeus, _Astronomical Algorithms_ 2nd ed., eq. 47.7.
pub fn mean_north_node_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_360(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}
