//! Astrocartography lines.
//!
//! For a body with right ascension α and declination δ at an instant with
//! Greenwich sidereal angle θ₀ (all degrees):
//!
//! - MC line: the meridian at longitude `α − θ₀`; IC is 180° away.
//! - AC/DC lines: at each latitude φ, the hour angle `H₀` of rising is
//!   `cos H₀ = (sin h₀ − sin φ sin δ) / (cos φ cos δ)` with
//!   `h₀ = −refraction`; the body rises at longitude `α − H₀ − θ₀` and sets
//!   at `α + H₀ − θ₀`. Latitudes where it never rises or never sets are
//!   skipped.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::point::{GeoPoint, MapDims, ProjectedPoint};
use crate::projector::GeoProjector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineKind {
    /// Upper culmination (Midheaven).
    Mc,
    /// Lower culmination (Imum Coeli).
    Ic,
    /// Rising (Ascendant).
    Ac,
    /// Setting (Descendant).
    Dc,
}

impl LineKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mc => "MC",
            Self::Ic => "IC",
            Self::Ac => "AC",
            Self::Dc => "DC",
        }
    }
}

/// Whether a body crosses the horizon at a latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    Normal,
    /// Never sets.
    Circumpolar,
    /// Never rises.
    NeverVisible,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Horizon refraction in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Latitude step along meridian lines, degrees. Default: 0.5.
    pub meridian_step_deg: f64,
    /// Latitude step along horizon lines within ±60°, degrees. Default: 0.5.
    pub horizon_step_deg: f64,
    /// Latitude step along horizon lines beyond ±60°, degrees. Default: 0.25.
    pub polar_step_deg: f64,
    /// Douglas–Peucker tolerance in degrees; `None` keeps every point.
    pub simplify_tolerance_deg: Option<f64>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            meridian_step_deg: 0.5,
            horizon_step_deg: 0.5,
            polar_step_deg: 0.25,
            simplify_tolerance_deg: Some(0.01),
        }
    }
}

impl LineConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.refraction_arcmin.is_finite() || self.refraction_arcmin.abs() > 120.0 {
            return Err("refraction_arcmin must be within ±120");
        }
        for step in [
            self.meridian_step_deg,
            self.horizon_step_deg,
            self.polar_step_deg,
        ] {
            if !step.is_finite() || step <= 0.0 || step > 10.0 {
                return Err("latitude steps must be in (0, 10]");
            }
        }
        if let Some(tol) = self.simplify_tolerance_deg {
            if !tol.is_finite() || tol < 0.0 {
                return Err("simplify_tolerance_deg must be non-negative");
            }
        }
        Ok(())
    }
}

/// A line as geographic points in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstroLine {
    pub kind: LineKind,
    pub points: Vec<GeoPoint>,
}

impl AstroLine {
    /// Pieces that never jump across the antimeridian.
    pub fn segments(&self) -> Vec<Vec<GeoPoint>> {
        split_at_antimeridian(&self.points)
    }

    pub fn simplified(&self, tolerance_deg: f64) -> Self {
        Self {
            kind: self.kind,
            points: simplify_line(&self.points, tolerance_deg),
        }
    }

    /// Each segment projected onto the map.
    pub fn project(&self, projector: &GeoProjector, dims: MapDims) -> Vec<Vec<ProjectedPoint>> {
        self.segments()
            .iter()
            .map(|seg| seg.iter().map(|p| projector.project(p, dims)).collect())
            .collect()
    }
}

/// The four lines of one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetLines {
    pub name: String,
    pub mc: AstroLine,
    pub ic: AstroLine,
    pub ac: AstroLine,
    pub dc: AstroLine,
}

impl PlanetLines {
    pub fn lines(&self) -> [&AstroLine; 4] {
        [&self.mc, &self.ic, &self.ac, &self.dc]
    }
}

/// Wrap a longitude to [-180, 180).
pub fn normalize_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Longitude of the MC line.
pub fn mc_longitude(ra_deg: f64, gmst_deg: f64) -> f64 {
    normalize_longitude(ra_deg - gmst_deg)
}

pub fn meridian_line(kind: LineKind, lng: f64, step_deg: f64) -> AstroLine {
    let lng = normalize_longitude(lng);
    let n = (180.0 / step_deg).floor() as usize;
    let points = (0..=n)
        .map(|i| GeoPoint::clamped(-90.0 + i as f64 * step_deg, lng))
        .collect();
    AstroLine { kind, points }
}

fn cos_hour_angle(dec_deg: f64, lat_deg: f64, refraction_arcmin: f64) -> f64 {
    let h0 = (-refraction_arcmin / 60.0).to_radians();
    let (phi, dec) = (lat_deg.to_radians(), dec_deg.to_radians());
    (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

pub fn visibility(dec_deg: f64, lat_deg: f64, refraction_arcmin: f64) -> Visibility {
    let cos_h = cos_hour_angle(dec_deg, lat_deg, refraction_arcmin);
    if cos_h < -1.0 {
        Visibility::Circumpolar
    } else if cos_h > 1.0 {
        Visibility::NeverVisible
    } else {
        Visibility::Normal
    }
}

/// Rising and setting longitudes at `lat_deg`, or `None` when the body
/// does not cross the horizon there.
pub fn rising_setting_longitudes(
    ra_deg: f64,
    dec_deg: f64,
    lat_deg: f64,
    gmst_deg: f64,
    refraction_arcmin: f64,
) -> Option<(f64, f64)> {
    let cos_h = cos_hour_angle(dec_deg, lat_deg, refraction_arcmin);
    if !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }
    let h = cos_h.acos().to_degrees();
    Some((
        normalize_longitude(ra_deg - h - gmst_deg),
        normalize_longitude(ra_deg + h - gmst_deg),
    ))
}

/// AC and DC lines from latitude −89° to +89°.
pub fn horizon_lines(
    ra_deg: f64,
    dec_deg: f64,
    gmst_deg: f64,
    config: &LineConfig,
) -> (AstroLine, AstroLine) {
    let mut ac = Vec::new();
    let mut dc = Vec::new();
    let mut lat: f64 = -89.0;
    while lat <= 89.0 {
        if let Some((rise, set)) =
            rising_setting_longitudes(ra_deg, dec_deg, lat, gmst_deg, config.refraction_arcmin)
        {
            ac.push(GeoPoint::clamped(lat, rise));
            dc.push(GeoPoint::clamped(lat, set));
        }
        lat += if lat.abs() > 60.0 {
            config.polar_step_deg
        } else {
            config.horizon_step_deg
        };
    }
    (
        AstroLine {
            kind: LineKind::Ac,
            points: ac,
        },
        AstroLine {
            kind: LineKind::Dc,
            points: dc,
        },
    )
}

/// All four lines of a body.
pub fn planet_lines(
    name: &str,
    ra_deg: f64,
    dec_deg: f64,
    gmst_deg: f64,
    config: &LineConfig,
) -> Result<PlanetLines, GeoError> {
    config.validate().map_err(GeoError::InvalidConfig)?;
    let mc_lng = mc_longitude(ra_deg, gmst_deg);
    let mc = meridian_line(LineKind::Mc, mc_lng, config.meridian_step_deg);
    let ic = meridian_line(LineKind::Ic, mc_lng + 180.0, config.meridian_step_deg);
    let (ac, dc) = horizon_lines(ra_deg, dec_deg, gmst_deg, config);

    let lines = match config.simplify_tolerance_deg {
        Some(tol) => [mc, ic, ac, dc].map(|l| l.simplified(tol)),
        None => [mc, ic, ac, dc],
    };
    let [mc, ic, ac, dc] = lines;
    Ok(PlanetLines {
        name: name.to_string(),
        mc,
        ic,
        ac,
        dc,
    })
}

/// Latitude where the segment `a → b` crosses ±180°, interpolating in
/// unwrapped longitude.
fn antimeridian_crossing_lat(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let unwrap = |lng: f64| if lng < 0.0 { lng + 360.0 } else { lng };
    let (la, lb) = (unwrap(a.lng()), unwrap(b.lng()));
    if (lb - la).abs() < f64::EPSILON {
        return a.lat();
    }
    let t = (180.0 - la) / (lb - la);
    a.lat() + t * (b.lat() - a.lat())
}

/// Split wherever consecutive points jump more than 180° in longitude,
/// closing each piece on the antimeridian.
pub fn split_at_antimeridian(points: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    let mut segments = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();

    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            let prev = &points[i - 1];
            if (p.lng() - prev.lng()).abs() > 180.0 {
                let lat = antimeridian_crossing_lat(prev, p);
                let edge = if prev.lng() > 0.0 { 180.0 } else { -180.0 };
                current.push(GeoPoint::clamped(lat, edge));
                segments.push(std::mem::take(&mut current));
                current.push(GeoPoint::clamped(lat, -edge));
            }
        }
        current.push(*p);
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Distance in the lat/lng plane from `p` to the line through `a` and `b`.
fn perpendicular_distance(p: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dx = b.lng() - a.lng();
    let dy = b.lat() - a.lat();
    let mag2 = dx * dx + dy * dy;
    if mag2 > 0.0 {
        let u = ((p.lng() - a.lng()) * dx + (p.lat() - a.lat()) * dy) / mag2;
        let (cx, cy) = (a.lng() + u * dx, a.lat() + u * dy);
        (p.lng() - cx).hypot(p.lat() - cy)
    } else {
        (p.lng() - a.lng()).hypot(p.lat() - a.lat())
    }
}

/// Douglas–Peucker simplification.
pub fn simplify_line(points: &[GeoPoint], tolerance_deg: f64) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let (first, last) = (&points[0], &points[points.len() - 1]);
    let (index, max) = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, perpendicular_distance(p, first, last)))
        .fold((0, 0.0), |best, c| if c.1 > best.1 { c } else { best });

    if max > tolerance_deg {
        let mut left = simplify_line(&points[..=index], tolerance_deg);
        let right = simplify_line(&points[index..], tolerance_deg);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![*first, *last]
    }
}
