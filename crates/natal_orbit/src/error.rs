//! Error types for orbit propagation.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OrbitError {
    /// Element set rejected before any computation.
    InvalidOrbitalElements(&'static str),
    /// Solver configuration rejected.
    InvalidConfig(&'static str),
}

impl Display for OrbitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrbitalElements(msg) => write!(f, "invalid orbital elements: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid solver config: {msg}"),
        }
    }
}

impl Error for OrbitError {}
