//! Chart orchestration over a shared ephemeris provider.

use std::sync::Arc;

use natal_base::{
    NodeMode, chart_angles, is_day_chart, mean_lilith_deg, part_of_fortune_deg, to_zodiac,
};
use natal_config::{MinorBody, NatalConfig};
use natal_core::{AnalyticEphemeris, Body, CachedEphemeris, EphemerisCache, EphemerisProvider};
use natal_frames::{SphericalCoords, ecliptic_to_equatorial, mean_obliquity_deg};
use natal_geo::{
    GeoPoint, GeoProjector, LineConfig, MapDims, PlanetLines, ProjectedPoint, planet_lines,
};
use natal_orbit::{MinorBodyFrame, MinorBodyPropagator};
use natal_search::LunarNodeLocator;
use natal_time::{UtcTime, centuries_since_j2000, gmst_deg};

use crate::chart::{CelestialPositionSet, ChartEntry, PointKind};
use crate::error::NatalError;

/// Half width of the finite-difference window for apparent motion, days.
const SPEED_HALF_SPAN_DAYS: f64 = 0.5;

/// A minor-body longitude and whether its Kepler solve converged.
struct MinorSample {
    lon_deg: f64,
    converged: bool,
}

/// Builds natal charts and map projections from one configuration.
///
/// Holds the provider behind an `Arc` so a caller can share one cached
/// provider between assemblers. Every method takes `&self`.
pub struct ChartAssembler {
    provider: Arc<dyn EphemerisProvider>,
    cache: Option<Arc<EphemerisCache>>,
    propagator: MinorBodyPropagator,
    minor_bodies: Vec<MinorBody>,
    frame: MinorBodyFrame,
    nodes: LunarNodeLocator<Arc<dyn EphemerisProvider>>,
    projector: GeoProjector,
    lines: LineConfig,
}

impl std::fmt::Debug for ChartAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartAssembler")
            .field("provider", &self.provider.name())
            .field("cache", &self.cache)
            .field("minor_bodies", &self.minor_bodies.len())
            .field("frame", &self.frame)
            .field("node_mode", &self.nodes.mode())
            .finish_non_exhaustive()
    }
}

impl ChartAssembler {
    /// Assembler over the built-in analytic ephemeris.
    pub fn new(config: &NatalConfig) -> Result<Self, NatalError> {
        let analytic = AnalyticEphemeris::with_kepler_config(config.kepler)?;
        Self::with_provider(Arc::new(analytic), config)
    }

    /// Assembler over a caller-supplied provider.
    ///
    /// When `config.cache` is set the provider is wrapped in a
    /// [`CachedEphemeris`]; the cache handle is available from [`Self::cache`].
    pub fn with_provider(
        provider: Arc<dyn EphemerisProvider>,
        config: &NatalConfig,
    ) -> Result<Self, NatalError> {
        config.validate()?;

        let mut provider = provider;
        let mut cache = None;
        if let Some(cache_config) = config.cache {
            let shared = Arc::new(EphemerisCache::new(cache_config)?);
            log::debug!(
                "ephemeris cache enabled: capacity {}, ttl {:?}s",
                cache_config.capacity,
                cache_config.ttl_secs
            );
            let wrapped: Arc<dyn EphemerisProvider> =
                Arc::new(CachedEphemeris::new(provider, Arc::clone(&shared)));
            provider = wrapped;
            cache = Some(shared);
        }

        let nodes = LunarNodeLocator::new(
            Arc::clone(&provider),
            config.node_search,
            config.node_mode,
        )?;

        Ok(Self {
            provider,
            cache,
            propagator: MinorBodyPropagator::new(config.kepler)?,
            minor_bodies: config.minor_bodies.clone(),
            frame: config.minor_body_frame,
            nodes,
            projector: GeoProjector::new(config.corrections.clone())?,
            lines: config.lines,
        })
    }

    pub fn provider(&self) -> &dyn EphemerisProvider {
        self.provider.as_ref()
    }

    pub fn cache(&self) -> Option<&Arc<EphemerisCache>> {
        self.cache.as_ref()
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    pub fn node_mode(&self) -> NodeMode {
        self.nodes.mode()
    }

    /// Full position set for an instant and birthplace.
    pub fn compute_chart(
        &self,
        at: &UtcTime,
        location: &GeoPoint,
    ) -> Result<CelestialPositionSet, NatalError> {
        let jd_ut = at.to_jd_utc();
        let jd_tt = at.to_jd_tt();
        let mut entries = Vec::with_capacity(Body::ALL.len() + self.minor_bodies.len() + 6);
        let mut low_confidence = Vec::new();

        let sun = self.provider.ecliptic_position(Body::Sun, jd_tt)?;
        let mut moon_lon = 0.0;
        for body in Body::ALL {
            let pos = if body == Body::Sun {
                sun
            } else {
                self.provider.ecliptic_position(body, jd_tt)?
            };
            if body == Body::Moon {
                moon_lon = pos.lon_deg;
            }
            let speed = self
                .provider
                .longitude_speed(body, jd_tt, SPEED_HALF_SPAN_DAYS)?;
            let retrograde = body.can_retrograde() && speed < 0.0;
            entries.push(
                ChartEntry::new(
                    &body.name().to_ascii_lowercase(),
                    PointKind::Body,
                    pos.lon_deg,
                    retrograde,
                )
                .with_speed(speed),
            );
        }

        for minor in &self.minor_bodies {
            let now = self.minor_longitude(minor, jd_tt)?;
            if !now.converged {
                log::warn!(
                    "{}: Kepler solve did not converge at JD(TT) {jd_tt:.5}",
                    minor.name
                );
                low_confidence.push(minor.name.clone());
            }
            let before = self.minor_longitude(minor, jd_tt - SPEED_HALF_SPAN_DAYS)?;
            let after = self.minor_longitude(minor, jd_tt + SPEED_HALF_SPAN_DAYS)?;
            let delta = (after.lon_deg - before.lon_deg + 540.0).rem_euclid(360.0) - 180.0;
            let speed = delta / (2.0 * SPEED_HALF_SPAN_DAYS);
            entries.push(
                ChartEntry::new(&minor.name, PointKind::MinorBody, now.lon_deg, speed < 0.0)
                    .with_speed(speed),
            );
        }

        let reading = self.nodes.nodes_at_jd_tt(jd_tt)?;
        entries.push(ChartEntry::new(
            "north_node",
            PointKind::LunarNode,
            reading.pair.north(),
            true,
        ));
        entries.push(ChartEntry::new(
            "south_node",
            PointKind::LunarNode,
            reading.pair.south(),
            true,
        ));

        let t = centuries_since_j2000(jd_tt);
        entries.push(ChartEntry::new(
            "lilith",
            PointKind::DerivedPoint,
            mean_lilith_deg(t),
            false,
        ));

        let angles = chart_angles(jd_ut, jd_tt, location.lat(), location.lng());
        let day = is_day_chart(angles.ascendant, sun.lon_deg);
        entries.push(ChartEntry::new(
            "part_of_fortune",
            PointKind::DerivedPoint,
            part_of_fortune_deg(angles.ascendant, sun.lon_deg, moon_lon),
            false,
        ));
        entries.push(ChartEntry::new(
            "ascendant",
            PointKind::Angle,
            angles.ascendant,
            false,
        ));
        entries.push(ChartEntry::new(
            "midheaven",
            PointKind::Angle,
            angles.midheaven,
            false,
        ));

        log::debug!(
            "chart at {at}: {} entries, nodes via {} mode",
            entries.len(),
            reading.mode.name()
        );

        Ok(CelestialPositionSet {
            instant: at.to_string(),
            jd_ut,
            jd_tt,
            location: *location,
            entries,
            north_node: to_zodiac(reading.pair.north()),
            south_node: to_zodiac(reading.pair.south()),
            nodes: reading,
            is_day_chart: day,
            low_confidence,
        })
    }

    fn minor_longitude(&self, minor: &MinorBody, jd_tt: f64) -> Result<MinorSample, NatalError> {
        match self.frame {
            MinorBodyFrame::Heliocentric => {
                let p = self.propagator.propagate(&minor.elements, jd_tt)?;
                Ok(MinorSample {
                    lon_deg: p.longitude_deg,
                    converged: p.converged(),
                })
            }
            MinorBodyFrame::Geocentric => {
                let sun = self.provider.ecliptic_position(Body::Sun, jd_tt)?;
                let sun = SphericalCoords {
                    lon_deg: sun.lon_deg,
                    lat_deg: sun.lat_deg,
                    distance: sun.distance_au,
                };
                let g = self.propagator.geocentric(&minor.elements, jd_tt, &sun)?;
                Ok(MinorSample {
                    lon_deg: g.lon_deg,
                    converged: g.heliocentric.converged(),
                })
            }
        }
    }

    /// Corrected pixel position of a place.
    pub fn project_to_map(&self, location: &GeoPoint, dims: MapDims) -> ProjectedPoint {
        self.projector.project(location, dims)
    }

    /// MC/IC/AC/DC lines of every ephemeris body at an instant.
    pub fn astrocartography(&self, at: &UtcTime) -> Result<Vec<PlanetLines>, NatalError> {
        let jd_tt = at.to_jd_tt();
        let eps = mean_obliquity_deg(centuries_since_j2000(jd_tt));
        let gmst = gmst_deg(at.to_jd_utc());

        let mut out = Vec::with_capacity(Body::ALL.len());
        for body in Body::ALL {
            let pos = self.provider.ecliptic_position(body, jd_tt)?;
            let eq = ecliptic_to_equatorial(pos.lon_deg, pos.lat_deg, eps);
            out.push(planet_lines(
                &body.name().to_ascii_lowercase(),
                eq.ra_deg,
                eq.dec_deg,
                gmst,
                &self.lines,
            )?);
        }
        Ok(out)
    }
}

/// Project a latitude/longitude with the default correction table.
pub fn project_to_map(lat: f64, lng: f64, dims: MapDims) -> Result<ProjectedPoint, NatalError> {
    Ok(GeoProjector::default().project_lat_lng(lat, lng, dims)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::{EclipticPosition, EngineError};

    /// Every body sits still except the Moon, which moves north through
    /// the ecliptic at a steady rate.
    struct Frozen;

    impl EphemerisProvider for Frozen {
        fn name(&self) -> &'static str {
            "frozen"
        }

        fn ecliptic_position(&self, body: Body, jd: f64) -> Result<EclipticPosition, EngineError> {
            let lon = match body {
                Body::Sun => 300.0,
                Body::Moon => (13.0 * (jd - 2_450_000.0)).rem_euclid(360.0),
                Body::Mars => 100.0 - 0.1 * (jd - 2_450_000.0),
                _ => 45.0,
            };
            Ok(EclipticPosition {
                lon_deg: lon.rem_euclid(360.0),
                lat_deg: 0.0,
                distance_au: 1.0,
            })
        }
    }

    fn at() -> UtcTime {
        UtcTime::new(1994, 2, 1, 1, 28, 0.0).unwrap()
    }

    fn london() -> GeoPoint {
        GeoPoint::new(51.5074, -0.1278).unwrap()
    }

    #[test]
    fn entries_in_fixed_order() {
        let a = ChartAssembler::with_provider(Arc::new(Frozen), &NatalConfig::default()).unwrap();
        let chart = a.compute_chart(&at(), &london()).unwrap();
        let names: Vec<&str> = chart.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus",
                "neptune", "pluto", "chiron", "north_node", "south_node", "lilith",
                "part_of_fortune", "ascendant", "midheaven",
            ]
        );
    }

    #[test]
    fn retrograde_follows_speed_sign() {
        let a = ChartAssembler::with_provider(Arc::new(Frozen), &NatalConfig::default()).unwrap();
        let chart = a.compute_chart(&at(), &london()).unwrap();
        assert!(chart.get("mars").unwrap().retrograde);
        assert!(!chart.get("venus").unwrap().retrograde);
        assert!(!chart.get("sun").unwrap().retrograde);
        assert!(chart.get("north_node").unwrap().retrograde);
    }

    #[test]
    fn cache_wraps_provider_when_configured() {
        let config = NatalConfig {
            cache: Some(natal_core::CacheConfig::default()),
            ..NatalConfig::default()
        };
        let a = ChartAssembler::with_provider(Arc::new(Frozen), &config).unwrap();
        let cache = a.cache().unwrap();
        a.compute_chart(&at(), &london()).unwrap();
        assert!(!cache.is_empty());
        assert!(cache.stats().hits > 0);
    }

    #[test]
    fn no_cache_by_default() {
        let a = ChartAssembler::with_provider(Arc::new(Frozen), &NatalConfig::default()).unwrap();
        assert!(a.cache().is_none());
    }

    #[test]
    fn heliocentric_minor_body_never_retrograde() {
        let config = NatalConfig {
            minor_body_frame: MinorBodyFrame::Heliocentric,
            ..NatalConfig::default()
        };
        let a = ChartAssembler::with_provider(Arc::new(Frozen), &config).unwrap();
        for day in [0.0, 100.0, 200.0, 300.0] {
            let t = UtcTime::from_jd_utc(at().to_jd_utc() + day);
            let chart = a.compute_chart(&t, &london()).unwrap();
            assert!(!chart.get("chiron").unwrap().retrograde);
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = NatalConfig::default();
        config.node_search.step_days = 0.0;
        assert!(matches!(
            ChartAssembler::new(&config),
            Err(NatalError::Config(_))
        ));
    }

    #[test]
    fn free_projection_rejects_out_of_range() {
        assert!(matches!(
            project_to_map(91.0, 0.0, MapDims::REFERENCE),
            Err(NatalError::Geo(_))
        ));
    }
}
