//! End-to-end chart assembly over the built-in analytic ephemeris.

use std::sync::Arc;

use natal_core::{EclipticPosition, EngineError};
use natal_orbit::KeplerConfig;
use natal_rs::*;
use natal_search::SearchError;

fn birth() -> UtcTime {
    UtcTime::new(1994, 2, 1, 1, 28, 0.0).unwrap()
}

fn london() -> GeoPoint {
    GeoPoint::new(51.5074, -0.1278).unwrap()
}

fn assembler() -> ChartAssembler {
    ChartAssembler::new(&NatalConfig::default()).unwrap()
}

#[test]
fn chiron_1994_in_virgo() {
    let chart = assembler().compute_chart(&birth(), &london()).unwrap();
    let chiron = chart.get("chiron").unwrap();
    assert_eq!(chiron.kind, PointKind::MinorBody);
    assert_eq!(chiron.sign, ZodiacSign::Virgo);
    assert!(
        (150.0..180.0).contains(&chiron.ecliptic_longitude),
        "Chiron = {}",
        chiron.ecliptic_longitude
    );
    // Near opposition to the Sun, so moving backward.
    assert!(chiron.retrograde);
    assert!(chart.low_confidence.is_empty());
}

#[test]
fn unconverged_kepler_solve_flags_low_confidence() {
    // A near-parabolic orbit that cannot meet an unreachable tolerance in
    // the minimum number of iterations.
    let eccentric = MinorBody {
        name: "eccentric".to_string(),
        elements: OrbitalElements {
            eccentricity: 0.9,
            mean_anomaly_at_epoch_deg: 17.2,
            ..OrbitalElements::CHIRON
        },
    };
    let config = NatalConfig {
        kepler: KeplerConfig {
            tolerance_rad: 1e-300,
            max_iterations: 10,
        },
        minor_bodies: vec![MinorBody::chiron(), eccentric],
        ..NatalConfig::default()
    };
    let chart = ChartAssembler::new(&config)
        .unwrap()
        .compute_chart(&birth(), &london())
        .unwrap();
    assert!(chart.is_low_confidence("eccentric"), "{:?}", chart.low_confidence);
    assert!(chart.is_low_confidence("ECCENTRIC"));
    // The best estimate is still reported.
    let entry = chart.get("eccentric").unwrap();
    assert_eq!(entry.kind, PointKind::MinorBody);
    assert!((0.0..360.0).contains(&entry.ecliptic_longitude));
    assert_eq!(chart.entries.len(), 18);
}

#[test]
fn nodes_1994_scorpio_taurus() {
    let chart = assembler().compute_chart(&birth(), &london()).unwrap();
    assert_eq!(chart.north_node.sign, ZodiacSign::Scorpio);
    assert_eq!(chart.south_node.sign, ZodiacSign::Taurus);
    assert_eq!(chart.nodes.mode, NodeMode::Mean);
    assert!(chart.nodes.event.is_none());
}

#[test]
fn nodes_exactly_opposite() {
    let a = assembler();
    for days in [0.0, 1234.5, 5000.0, -3000.25] {
        let at = UtcTime::from_jd_utc(birth().to_jd_utc() + days);
        let chart = a.compute_chart(&at, &london()).unwrap();
        let n = chart.nodes.pair.north();
        let s = chart.nodes.pair.south();
        assert_eq!(s, (n + 180.0).rem_euclid(360.0));
    }
}

#[test]
fn crossing_mode_node_near_mean() {
    let config = NatalConfig {
        node_mode: NodeMode::Crossing,
        ..NatalConfig::default()
    };
    let chart = ChartAssembler::new(&config)
        .unwrap()
        .compute_chart(&birth(), &london())
        .unwrap();
    assert_eq!(chart.nodes.mode, NodeMode::Crossing);
    assert!(chart.nodes.event.is_some());
    let mean = assembler()
        .compute_chart(&birth(), &london())
        .unwrap()
        .nodes
        .pair
        .north();
    let diff = (chart.nodes.pair.north() - mean + 540.0).rem_euclid(360.0) - 180.0;
    assert!(diff.abs() < 3.0, "crossing − mean = {diff}");
}

#[test]
fn every_entry_in_range() {
    let chart = assembler().compute_chart(&birth(), &london()).unwrap();
    assert_eq!(chart.entries.len(), 17);
    for e in &chart.entries {
        assert!(
            (0.0..360.0).contains(&e.ecliptic_longitude),
            "{} = {}",
            e.name,
            e.ecliptic_longitude
        );
        assert!((0.0..30.0).contains(&e.degree_in_sign), "{}", e.name);
        assert_eq!(e.sign, to_zodiac(e.ecliptic_longitude).sign, "{}", e.name);
    }
    assert_eq!(chart.get("Sun").unwrap().sign, ZodiacSign::Aquarius);
}

#[test]
fn night_birth_in_london() {
    // 01:28 UT in February: the Sun is well below the horizon.
    let chart = assembler().compute_chart(&birth(), &london()).unwrap();
    assert!(!chart.is_day_chart);
}

#[test]
fn chart_serializes_to_json() {
    let chart = assembler().compute_chart(&birth(), &london()).unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["instant"], "1994-02-01T01:28:00Z");
    assert_eq!(json["entries"][0]["name"], "sun");
    assert_eq!(json["entries"][10]["name"], "chiron");
    assert_eq!(json["entries"][10]["kind"], "minor_body");
    assert_eq!(json["north_node"]["sign"], "Scorpio");
    assert_eq!(json["nodes"]["mode"], "mean");
}

#[test]
fn london_projects_near_reference_pixel() {
    let p = assembler().project_to_map(&london(), MapDims::REFERENCE);
    assert!((p.x - 472.6).abs() < 5.0, "x = {}", p.x);
    assert!((p.y - 53.7).abs() < 5.0, "y = {}", p.y);

    let q = project_to_map(51.5074, -0.1278, MapDims::REFERENCE).unwrap();
    assert_eq!(p, q);
}

#[test]
fn astrocartography_covers_every_body() {
    let lines = assembler().astrocartography(&birth()).unwrap();
    assert_eq!(lines.len(), Body::ALL.len());
    for pl in &lines {
        assert!(!pl.mc.points.is_empty(), "{}", pl.name);
        assert!(!pl.ic.points.is_empty(), "{}", pl.name);
    }
    assert_eq!(lines[0].name, "sun");
}

/// A Moon that never leaves the ecliptic's northern side.
struct NoCrossing;

impl EphemerisProvider for NoCrossing {
    fn name(&self) -> &'static str {
        "no-crossing"
    }

    fn ecliptic_position(&self, body: Body, jd: f64) -> Result<EclipticPosition, EngineError> {
        let lat = if body == Body::Moon { 2.0 } else { 0.0 };
        Ok(EclipticPosition {
            lon_deg: (jd * 0.5).rem_euclid(360.0),
            lat_deg: lat,
            distance_au: 1.0,
        })
    }
}

#[test]
fn failed_node_search_surfaces() {
    let config = NatalConfig {
        node_mode: NodeMode::Crossing,
        ..NatalConfig::default()
    };
    let a = ChartAssembler::with_provider(Arc::new(NoCrossing), &config).unwrap();
    let err = a.compute_chart(&birth(), &london()).unwrap_err();
    assert!(
        matches!(err, NatalError::Search(SearchError::NodeSearchFailed { .. })),
        "{err}"
    );
}

#[test]
fn mean_mode_ignores_lunar_latitude() {
    let a = ChartAssembler::with_provider(Arc::new(NoCrossing), &NatalConfig::default()).unwrap();
    assert!(a.compute_chart(&birth(), &london()).is_ok());
}
