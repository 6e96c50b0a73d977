//! Error types for node search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use natal_core::EngineError;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The ephemeris provider failed.
    Engine(EngineError),
    InvalidConfig(&'static str),
    /// No node crossing inside the backward search window.
    NodeSearchFailed { jd_tt: f64, window_days: f64 },
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(e) => write!(f, "engine error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::NodeSearchFailed { jd_tt, window_days } => write!(
                f,
                "no lunar node crossing within {window_days} days before JD {jd_tt}"
            ),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for SearchError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
