//! Default correction table on the reference world map.

use natal_geo::{
    Calibration, CorrectionTable, GeoError, GeoPoint, GeoProjector, LineConfig, MapDims,
    ReferencePoint, Zone, planet_lines,
};

fn project(lat: f64, lng: f64) -> natal_geo::ProjectedPoint {
    GeoProjector::default()
        .project_lat_lng(lat, lng, MapDims::REFERENCE)
        .unwrap()
}

#[test]
fn london_lands_on_measured_pixel() {
    let p = project(51.5074, -0.1278);
    assert_eq!(p.zone, Zone::Europe);
    assert_eq!(p.rule.as_deref(), Some("london"));
    let err = (p.x - 472.6).hypot(p.y - 53.7);
    assert!(err < 5.0, "london at ({:.1}, {:.1})", p.x, p.y);
}

#[test]
fn new_york_lands_on_measured_pixel() {
    let p = project(40.7128, -74.006);
    let err = (p.x - 286.4).hypot(p.y - 116.4);
    assert!(err < 5.0, "new york at ({:.1}, {:.1})", p.x, p.y);
}

#[test]
fn corners_within_bounds() {
    let dims = MapDims::REFERENCE;
    for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0), (90.0, -180.0), (-90.0, 180.0)] {
        let p = project(lat, lng);
        assert!((0.0..=dims.width()).contains(&p.x), "x = {}", p.x);
        assert!((0.0..=dims.height()).contains(&p.y), "y = {}", p.y);
    }
}

#[test]
fn grid_stays_in_bounds_and_is_deterministic() {
    let proj = GeoProjector::default();
    let dims = MapDims::new(800.0, 400.0).unwrap();
    for lat in (-90..=90).step_by(5) {
        for lng in (-180..=180).step_by(5) {
            let g = GeoPoint::new(lat as f64, lng as f64).unwrap();
            let a = proj.project(&g, dims);
            let b = proj.project(&g, dims);
            assert_eq!(a, b);
            assert!(a.x >= 0.0 && a.x <= dims.width());
            assert!(a.y >= 0.0 && a.y <= dims.height());
        }
    }
}

#[test]
fn out_of_range_rejected_before_projection() {
    let err = GeoProjector::default()
        .project_lat_lng(95.0, 0.0, MapDims::REFERENCE)
        .unwrap_err();
    assert_eq!(
        err,
        GeoError::OutOfBoundsGeo {
            lat: 95.0,
            lng: 0.0
        }
    );
}

#[test]
fn fallback_zone_uses_base_projection() {
    let p = project(0.0, -100.0);
    assert_eq!(p.zone, Zone::Fallback);
    assert_eq!(p.rule, None);
    assert!((p.x - (80.0 / 360.0 * 1000.0 - 27.0)).abs() < 1e-9);
}

#[test]
fn unproject_roundtrip_away_from_boundaries() {
    let proj = GeoProjector::default();
    let dims = MapDims::REFERENCE;
    for (lat, lng) in [
        (48.8566, 2.3522),
        (40.7128, -74.006),
        (55.0, -100.0),
        (35.6762, 139.6503),
        (-20.0, -150.0),
        (-10.0, -60.0),
    ] {
        let p = proj.project_lat_lng(lat, lng, dims).unwrap();
        let back = proj.unproject(p.x, p.y, dims).unwrap();
        assert!(
            (back.lat() - lat).abs() < 1e-6 && (back.lng() - lng).abs() < 1e-6,
            "({lat}, {lng}) came back as ({}, {})",
            back.lat(),
            back.lng()
        );
    }
}

#[test]
fn recalibrated_table_matches_default_at_reference_points() {
    let points = ReferencePoint::defaults();
    let table = CorrectionTable::calibrate(&points, &Calibration::default()).unwrap();
    let proj = GeoProjector::new(table).unwrap();
    let london = proj
        .project_lat_lng(51.5074, -0.1278, MapDims::REFERENCE)
        .unwrap();
    assert!((london.x - 472.6).abs() < 1e-9);
    assert!((london.y - 53.7).abs() < 1e-9);
}

#[test]
fn lines_project_per_segment() {
    let proj = GeoProjector::default();
    let lines = planet_lines("moon", 350.0, -5.0, 20.0, &LineConfig::default()).unwrap();
    for line in lines.lines() {
        for seg in line.project(&proj, MapDims::REFERENCE) {
            assert!(!seg.is_empty());
        }
    }
}
