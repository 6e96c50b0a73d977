//! Geographic coordinates onto a fixed world-map image.
//!
//! [`GeoProjector`] maps latitude/longitude to pixels with an
//! equirectangular base projection, a global horizontal offset, and a
//! [`CorrectionTable`] of empirical per-zone and per-landmark offsets.
//! [`lines`] computes astrocartography lines that can be drawn through the
//! same projector.

pub mod correction;
pub mod error;
pub mod lines;
pub mod point;
pub mod projector;
pub mod zone;

pub use correction::{
    Calibration, CorrectionRule, CorrectionTable, GLOBAL_OFFSET_X, ReferencePoint, Region,
    ValidationEntry, ValidationReport,
};
pub use error::GeoError;
pub use lines::{AstroLine, LineConfig, LineKind, PlanetLines, Visibility, planet_lines};
pub use point::{GeoPoint, MapDims, ProjectedPoint};
pub use projector::GeoProjector;
pub use zone::{Zone, ZoneBounds};

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<GeoProjector>();
            assert_send_sync::<CorrectionTable>();
        }
    };
}
