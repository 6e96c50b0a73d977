//! Geographic zones used to pick a correction.

use serde::{Deserialize, Serialize};

use crate::point::GeoPoint;

/// Inclusive latitude/longitude box. When `min_lng > max_lng` the box
/// wraps across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl ZoneBounds {
    pub fn contains(&self, p: &GeoPoint) -> bool {
        let in_lat = p.lat() >= self.min_lat && p.lat() <= self.max_lat;
        let in_lng = if self.min_lng <= self.max_lng {
            p.lng() >= self.min_lng && p.lng() <= self.max_lng
        } else {
            p.lng() >= self.min_lng || p.lng() <= self.max_lng
        };
        in_lat && in_lng
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Europe,
    NorthAmerica,
    Asia,
    SouthAmerica,
    Pacific,
    /// Outside every zone box; no correction applies.
    Fallback,
}

impl Zone {
    /// Classification order. Boxes overlap; the first match wins.
    pub const ORDERED: [Zone; 5] = [
        Zone::Europe,
        Zone::NorthAmerica,
        Zone::Asia,
        Zone::SouthAmerica,
        Zone::Pacific,
    ];

    pub const fn bounds(self) -> Option<ZoneBounds> {
        let b = match self {
            Self::Europe => (-35.0, 70.0, -25.0, 50.0),
            Self::NorthAmerica => (15.0, 75.0, -170.0, -50.0),
            Self::Asia => (-10.0, 70.0, 50.0, 180.0),
            Self::SouthAmerica => (-60.0, 15.0, -85.0, -30.0),
            Self::Pacific => (-50.0, 70.0, 120.0, -120.0),
            Self::Fallback => return None,
        };
        Some(ZoneBounds {
            min_lat: b.0,
            max_lat: b.1,
            min_lng: b.2,
            max_lng: b.3,
        })
    }

    pub fn classify(p: &GeoPoint) -> Zone {
        Self::ORDERED
            .into_iter()
            .find(|z| z.bounds().is_some_and(|b| b.contains(p)))
            .unwrap_or(Zone::Fallback)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Europe => "europe",
            Self::NorthAmerica => "north_america",
            Self::Asia => "asia",
            Self::SouthAmerica => "south_america",
            Self::Pacific => "pacific",
            Self::Fallback => "fallback",
        }
    }
}
