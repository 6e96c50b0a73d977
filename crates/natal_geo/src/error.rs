//! Error types for map projection.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeoError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or NaN.
    OutOfBoundsGeo { lat: f64, lng: f64 },
    InvalidDimensions(&'static str),
    InvalidTable(&'static str),
    InvalidConfig(&'static str),
    /// Pixel coordinate is not finite.
    InvalidPixel { x: f64, y: f64 },
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBoundsGeo { lat, lng } => {
                write!(f, "coordinate out of bounds: lat {lat}, lng {lng}")
            }
            Self::InvalidDimensions(msg) => write!(f, "invalid map dimensions: {msg}"),
            Self::InvalidTable(msg) => write!(f, "invalid correction table: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidPixel { x, y } => write!(f, "invalid pixel coordinate ({x}, {y})"),
        }
    }
}

impl Error for GeoError {}
