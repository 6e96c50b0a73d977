//! Natal chart assembly and world-map projection.
//!
//! [`ChartAssembler`] ties the workspace together: planetary longitudes from
//! an [`EphemerisProvider`], minor bodies from Keplerian elements, lunar
//! nodes from [`LunarNodeLocator`](natal_search::LunarNodeLocator), and chart
//! angles, all mapped onto the tropical zodiac. The same assembler projects
//! birthplaces onto a corrected equirectangular map and draws
//! astrocartography lines.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use natal_rs::*;
//!
//! let assembler = ChartAssembler::new(&NatalConfig::default()).unwrap();
//! let at: UtcTime = "1994-02-01T01:28:00Z".parse().unwrap();
//! let place = GeoPoint::new(51.5074, -0.1278).unwrap();
//!
//! let chart = assembler.compute_chart(&at, &place).unwrap();
//! let chiron = chart.get("chiron").unwrap();
//! println!("Chiron {:.2}° {}", chiron.degree_in_sign, chiron.sign.name());
//!
//! let pixel = assembler.project_to_map(&place, MapDims::REFERENCE);
//! println!("London at ({:.1}, {:.1})", pixel.x, pixel.y);
//! ```

pub mod assembler;
pub mod chart;
pub mod error;

pub use assembler::{ChartAssembler, project_to_map};
pub use chart::{CelestialPositionSet, ChartEntry, PointKind};
pub use error::NatalError;

// Re-export the types callers need so a single dependency suffices.
pub use natal_base::{NodeMode, ZodiacPosition, ZodiacSign, deg_to_dms, to_zodiac};
pub use natal_config::{MinorBody, NatalConfig};
pub use natal_core::{AnalyticEphemeris, Body, EphemerisProvider};
pub use natal_geo::{GeoPoint, MapDims, PlanetLines, ProjectedPoint};
pub use natal_orbit::{MinorBodyFrame, OrbitalElements};
pub use natal_search::NodeReading;
pub use natal_time::UtcTime;
