//! Lunar node search.
//!
//! This crate provides:
//! - A coarse-scan + bisection search for the Moon's ecliptic crossings
//!   over any [`natal_core::EphemerisProvider`]
//! - [`LunarNodeLocator`], which turns the nearest crossing (or the mean
//!   node polynomial) into a North/South [`natal_base::NodePair`]

pub mod error;
pub mod locator;
pub mod node_search;
pub mod node_types;

pub use error::SearchError;
pub use locator::{LunarNodeLocator, NodeReading};
pub use node_search::{
    moon_ecliptic_lon_lat, next_node_crossing, prev_node_crossing, search_node_crossings,
};
pub use node_types::{NodeEvent, NodeKind, NodeSearchConfig, SearchDirection};
