//! North/South node lookup for a chart instant.

use natal_base::{NodeMode, NodePair, mean_north_node_deg};
use natal_core::EphemerisProvider;
use natal_time::{UtcTime, centuries_since_j2000};
use serde::Serialize;

use crate::error::SearchError;
use crate::node_search::prev_node_crossing;
use crate::node_types::{NodeEvent, NodeSearchConfig};

/// Node positions at an instant and how they were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeReading {
    pub pair: NodePair,
    pub mode: NodeMode,
    /// The crossing the pair was read from (crossing mode only).
    pub event: Option<NodeEvent>,
}

/// Locates the lunar nodes for chart instants.
///
/// In [`NodeMode::Crossing`] the locator looks backward from the instant
/// for the Moon's most recent crossing of the ecliptic and reads the node
/// from the Moon's longitude there. In [`NodeMode::Mean`] it evaluates the
/// mean node polynomial and never queries the provider.
#[derive(Debug, Clone)]
pub struct LunarNodeLocator<P> {
    provider: P,
    config: NodeSearchConfig,
    mode: NodeMode,
}

impl<P: EphemerisProvider> LunarNodeLocator<P> {
    pub fn new(provider: P, config: NodeSearchConfig, mode: NodeMode) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self {
            provider,
            config,
            mode,
        })
    }

    /// Default search settings in the default ([`NodeMode::Mean`]) mode.
    pub fn with_defaults(provider: P) -> Self {
        Self {
            provider,
            config: NodeSearchConfig::default(),
            mode: NodeMode::default(),
        }
    }

    pub fn mode(&self) -> NodeMode {
        self.mode
    }

    pub fn config(&self) -> &NodeSearchConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Nodes at a UTC instant.
    pub fn nodes_near(&self, at: &UtcTime) -> Result<NodeReading, SearchError> {
        self.nodes_at_jd_tt(at.to_jd_tt())
    }

    /// Nodes at a TT Julian Date.
    pub fn nodes_at_jd_tt(&self, jd_tt: f64) -> Result<NodeReading, SearchError> {
        match self.mode {
            NodeMode::Mean => Ok(NodeReading {
                pair: NodePair::from_north(mean_north_node_deg(centuries_since_j2000(jd_tt))),
                mode: NodeMode::Mean,
                event: None,
            }),
            NodeMode::Crossing => {
                let event = prev_node_crossing(&self.provider, jd_tt, &self.config)?.ok_or(
                    SearchError::NodeSearchFailed {
                        jd_tt,
                        window_days: self.config.window_days,
                    },
                )?;
                Ok(NodeReading {
                    pair: NodePair::from_north(event.north_longitude_deg()),
                    mode: NodeMode::Crossing,
                    event: Some(event),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::{Body, EclipticPosition, EngineError};

    /// The Moon never leaves the ecliptic plane's north side.
    struct NorthOnly;

    impl EphemerisProvider for NorthOnly {
        fn name(&self) -> &'static str {
            "north-only"
        }

        fn ecliptic_position(&self, _: Body, _: f64) -> Result<EclipticPosition, EngineError> {
            Ok(EclipticPosition {
                lon_deg: 42.0,
                lat_deg: 1.0,
                distance_au: 0.0026,
            })
        }
    }

    /// Descending crossing at JD 10 with the Moon at 250°.
    struct DescendsAtTen;

    impl EphemerisProvider for DescendsAtTen {
        fn name(&self) -> &'static str {
            "descends"
        }

        fn ecliptic_position(&self, _: Body, jd: f64) -> Result<EclipticPosition, EngineError> {
            Ok(EclipticPosition {
                lon_deg: 250.0 + 13.0 * (jd - 10.0),
                lat_deg: -(jd - 10.0),
                distance_au: 0.0026,
            })
        }
    }

    struct Failing;

    impl EphemerisProvider for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn ecliptic_position(&self, b: Body, _: f64) -> Result<EclipticPosition, EngineError> {
            Err(EngineError::UnsupportedBody(b))
        }
    }

    #[test]
    fn crossing_mode_without_crossing_fails() {
        let loc =
            LunarNodeLocator::new(NorthOnly, NodeSearchConfig::default(), NodeMode::Crossing)
                .unwrap();
        match loc.nodes_at_jd_tt(2_451_545.0) {
            Err(SearchError::NodeSearchFailed { jd_tt, window_days }) => {
                assert_eq!(jd_tt, 2_451_545.0);
                assert_eq!(window_days, 30.0);
            }
            other => panic!("expected NodeSearchFailed, got {other:?}"),
        }
    }

    #[test]
    fn descending_crossing_flips_to_north() {
        let loc =
            LunarNodeLocator::new(DescendsAtTen, NodeSearchConfig::default(), NodeMode::Crossing)
                .unwrap();
        let r = loc.nodes_at_jd_tt(15.2).unwrap();
        let e = r.event.unwrap();
        assert!((e.jd_tt - 10.0).abs() < 1e-6);
        assert!((r.pair.south() - 250.0).abs() < 1e-4, "south = {}", r.pair.south());
        assert!((r.pair.north() - 70.0).abs() < 1e-4);
    }

    #[test]
    fn mean_mode_never_queries_provider() {
        let loc = LunarNodeLocator::with_defaults(Failing);
        let r = loc.nodes_at_jd_tt(2_451_545.0).unwrap();
        assert_eq!(r.mode, NodeMode::Mean);
        assert!(r.event.is_none());
        assert!((r.pair.north() - 125.044_547_9).abs() < 1e-9);
    }

    #[test]
    fn provider_error_propagates() {
        let loc =
            LunarNodeLocator::new(Failing, NodeSearchConfig::default(), NodeMode::Crossing)
                .unwrap();
        assert!(matches!(
            loc.nodes_at_jd_tt(0.0),
            Err(SearchError::Engine(EngineError::UnsupportedBody(Body::Moon)))
        ));
    }

    #[test]
    fn invalid_window_rejected() {
        let config = NodeSearchConfig {
            window_days: 10.0,
            ..NodeSearchConfig::default()
        };
        let loc = LunarNodeLocator::new(NorthOnly, config, NodeMode::Crossing);
        assert!(loc.is_err());
    }
}
