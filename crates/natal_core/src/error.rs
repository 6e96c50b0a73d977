//! Ephemeris error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::body::Body;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    InvalidConfig(&'static str),
    InvalidQuery(&'static str),
    /// The provider has no theory for this body.
    UnsupportedBody(Body),
    EpochOutOfRange { jd_tt: f64 },
    /// Failure reported by an external provider.
    Provider(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::UnsupportedBody(body) => write!(f, "unsupported body: {}", body.name()),
            Self::EpochOutOfRange { jd_tt } => write!(f, "epoch out of range: JD {jd_tt}"),
            Self::Provider(msg) => write!(f, "ephemeris provider error: {msg}"),
        }
    }
}

impl Error for EngineError {}
