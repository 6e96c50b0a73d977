//! Umbrella error for chart assembly.

use std::error::Error;
use std::fmt::{Display, Formatter};

use natal_config::ConfigError;
use natal_core::EngineError;
use natal_geo::GeoError;
use natal_orbit::OrbitError;
use natal_search::SearchError;
use natal_time::TimeError;

#[derive(Debug)]
#[non_exhaustive]
pub enum NatalError {
    Time(TimeError),
    Engine(EngineError),
    Orbit(OrbitError),
    Search(SearchError),
    Geo(GeoError),
    Config(ConfigError),
}

impl Display for NatalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time: {e}"),
            Self::Engine(e) => write!(f, "ephemeris: {e}"),
            Self::Orbit(e) => write!(f, "orbit: {e}"),
            Self::Search(e) => write!(f, "node search: {e}"),
            Self::Geo(e) => write!(f, "geo: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for NatalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Orbit(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Geo(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<TimeError> for NatalError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<EngineError> for NatalError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<OrbitError> for NatalError {
    fn from(e: OrbitError) -> Self {
        Self::Orbit(e)
    }
}

impl From<SearchError> for NatalError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<GeoError> for NatalError {
    fn from(e: GeoError) -> Self {
        Self::Geo(e)
    }
}

impl From<ConfigError> for NatalError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
