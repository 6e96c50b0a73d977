//! Geographic points, map sizes and projected pixels.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::zone::Zone;

/// A validated geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, GeoError> {
        Self::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    /// Rejects NaN, `|lat| > 90` and `|lng| > 180`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::OutOfBoundsGeo { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Clamp latitude and clamp longitude into range. NaN becomes 0.
    pub(crate) fn clamped(lat: f64, lng: f64) -> Self {
        let lat = if lat.is_nan() { 0.0 } else { lat.clamp(-90.0, 90.0) };
        let lng = if lng.is_nan() { 0.0 } else { lng.clamp(-180.0, 180.0) };
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Pixel size of a map image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDims {
    width: f64,
    height: f64,
}

impl MapDims {
    /// The world map asset the default correction table was measured on.
    pub const REFERENCE: Self = Self {
        width: 1000.0,
        height: 507.209,
    };

    pub fn new(width: f64, height: f64) -> Result<Self, GeoError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(GeoError::InvalidDimensions("width must be positive"));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(GeoError::InvalidDimensions("height must be positive"));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Default for MapDims {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// A geographic point placed on the map, always inside
/// `[0, width] × [0, height]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub zone: Zone,
    /// Name of the correction rule that applied, if any.
    pub rule: Option<String>,
}
