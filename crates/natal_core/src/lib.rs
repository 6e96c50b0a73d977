//! Ephemeris contract and the built-in analytic provider.
//!
//! Everything downstream asks an [`EphemerisProvider`] for geocentric
//! ecliptic positions of date. [`AnalyticEphemeris`] answers from
//! closed-form theories and needs no data files; a higher-precision
//! provider can be swapped in behind the same trait. [`CachedEphemeris`]
//! wraps any provider with an explicit, caller-owned [`EphemerisCache`].

pub mod analytic;
pub mod body;
pub mod cache;
pub mod error;
pub mod provider;

pub use analytic::AnalyticEphemeris;
pub use body::Body;
pub use cache::{CacheConfig, CacheStats, CachedEphemeris, EphemerisCache};
pub use error::EngineError;
pub use provider::{EclipticPosition, EphemerisProvider};
