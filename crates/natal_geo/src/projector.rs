//! Forward and inverse map projection.

use crate::correction::CorrectionTable;
use crate::error::GeoError;
use crate::point::{GeoPoint, MapDims, ProjectedPoint};
use crate::zone::Zone;

const UNPROJECT_MAX_ITERATIONS: usize = 20;
const UNPROJECT_TOLERANCE_DEG: f64 = 1e-9;

fn scale(table: &CorrectionTable, dims: MapDims) -> (f64, f64) {
    (
        dims.width() / table.reference_width,
        dims.height() / table.reference_height,
    )
}

/// Equirectangular position shifted by the global offset, unclamped.
pub(crate) fn base_xy(table: &CorrectionTable, p: &GeoPoint, dims: MapDims) -> (f64, f64) {
    let (sx, _) = scale(table, dims);
    let x = (p.lng() + 180.0) / 360.0 * dims.width() - table.global_offset_x * sx;
    let y = (90.0 - p.lat()) / 180.0 * dims.height();
    (x, y)
}

fn inverse_base(table: &CorrectionTable, x: f64, y: f64, dims: MapDims) -> (f64, f64) {
    let (sx, _) = scale(table, dims);
    let lng = (x + table.global_offset_x * sx) / dims.width() * 360.0 - 180.0;
    let lat = 90.0 - y / dims.height() * 180.0;
    (lat, lng)
}

/// Zone, rule name and scaled pixel offset for `p`.
fn correction<'a>(
    table: &'a CorrectionTable,
    p: &GeoPoint,
    dims: MapDims,
) -> (Zone, Option<&'a str>, f64, f64) {
    let zone = Zone::classify(p);
    match table.matching_rule(zone, p) {
        Some(rule) => {
            let (sx, sy) = scale(table, dims);
            (zone, Some(rule.name.as_str()), rule.dx * sx, rule.dy * sy)
        }
        None => (zone, None, 0.0, 0.0),
    }
}

pub(crate) fn project_with(
    table: &CorrectionTable,
    p: &GeoPoint,
    dims: MapDims,
) -> ProjectedPoint {
    let (x, y) = base_xy(table, p, dims);
    let (zone, rule, dx, dy) = correction(table, p, dims);
    ProjectedPoint {
        x: (x + dx).clamp(0.0, dims.width()),
        y: (y + dy).clamp(0.0, dims.height()),
        zone,
        rule: rule.map(str::to_string),
    }
}

/// Projects geographic points onto one map asset.
#[derive(Debug, Clone, Default)]
pub struct GeoProjector {
    table: CorrectionTable,
}

impl GeoProjector {
    pub fn new(table: CorrectionTable) -> Result<Self, GeoError> {
        table.validate().map_err(GeoError::InvalidTable)?;
        Ok(Self { table })
    }

    pub fn table(&self) -> &CorrectionTable {
        &self.table
    }

    pub fn project(&self, p: &GeoPoint, dims: MapDims) -> ProjectedPoint {
        project_with(&self.table, p, dims)
    }

    /// Validate raw coordinates, then project.
    pub fn project_lat_lng(
        &self,
        lat: f64,
        lng: f64,
        dims: MapDims,
    ) -> Result<ProjectedPoint, GeoError> {
        Ok(self.project(&GeoPoint::new(lat, lng)?, dims))
    }

    /// Geographic point whose corrected projection lands on `(x, y)`.
    ///
    /// Fixed-point iteration: guess a point, look up the correction that
    /// applies there, remove it from the pixel and invert the base
    /// projection. Converges in a few steps away from rule boundaries;
    /// across a boundary the last guess is returned. Results are clamped
    /// to valid coordinates.
    pub fn unproject(&self, x: f64, y: f64, dims: MapDims) -> Result<GeoPoint, GeoError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeoError::InvalidPixel { x, y });
        }
        let (lat, lng) = inverse_base(&self.table, x, y, dims);
        let mut guess = GeoPoint::clamped(lat, lng);

        for _ in 0..UNPROJECT_MAX_ITERATIONS {
            let (_, _, dx, dy) = correction(&self.table, &guess, dims);
            let (lat, lng) = inverse_base(&self.table, x - dx, y - dy, dims);
            let next = GeoPoint::clamped(lat, lng);
            let moved = (next.lat() - guess.lat()).abs() + (next.lng() - guess.lng()).abs();
            guess = next;
            if moved < UNPROJECT_TOLERANCE_DEG {
                return Ok(guess);
            }
        }

        log::debug!("unproject ({x}, {y}) did not settle; returning last estimate");
        Ok(guess)
    }
}
