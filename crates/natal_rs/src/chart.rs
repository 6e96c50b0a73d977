//! Chart result types.

use natal_base::{ZodiacPosition, ZodiacSign, to_zodiac};
use natal_geo::GeoPoint;
use natal_search::NodeReading;
use serde::Serialize;

/// What an entry of a chart is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// Sun through Pluto, from the ephemeris provider.
    Body,
    /// Propagated from orbital elements.
    MinorBody,
    LunarNode,
    /// Lilith and the Part of Fortune.
    DerivedPoint,
    /// Ascendant and Midheaven.
    Angle,
}

/// One named longitude of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub name: String,
    pub kind: PointKind,
    /// Ecliptic longitude of date, degrees [0, 360).
    pub ecliptic_longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
    pub retrograde: bool,
    /// Apparent longitude motion, when measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_deg_per_day: Option<f64>,
}

impl ChartEntry {
    pub(crate) fn new(name: &str, kind: PointKind, longitude: f64, retrograde: bool) -> Self {
        let z = to_zodiac(longitude);
        Self {
            name: name.to_string(),
            kind,
            ecliptic_longitude: z.longitude(),
            sign: z.sign,
            degree_in_sign: z.degree_in_sign,
            retrograde,
            speed_deg_per_day: None,
        }
    }

    pub(crate) fn with_speed(mut self, speed: f64) -> Self {
        self.speed_deg_per_day = Some(speed);
        self
    }

    pub fn zodiac(&self) -> ZodiacPosition {
        ZodiacPosition {
            sign: self.sign,
            degree_in_sign: self.degree_in_sign,
        }
    }
}

/// Everything computed for one instant and place.
///
/// `entries` keeps a fixed order: the ten ephemeris bodies, configured
/// minor bodies, the nodes, Lilith, the Part of Fortune, then the angles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialPositionSet {
    /// UTC instant, ISO 8601.
    pub instant: String,
    pub jd_ut: f64,
    pub jd_tt: f64,
    pub location: GeoPoint,
    pub entries: Vec<ChartEntry>,
    pub north_node: ZodiacPosition,
    pub south_node: ZodiacPosition,
    pub nodes: NodeReading,
    pub is_day_chart: bool,
    /// Names of entries whose solution did not fully converge.
    pub low_confidence: Vec<String>,
}

impl CelestialPositionSet {
    /// Case-insensitive lookup by entry name.
    pub fn get(&self, name: &str) -> Option<&ChartEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn is_low_confidence(&self, name: &str) -> bool {
        self.low_confidence
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}
