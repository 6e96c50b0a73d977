//! Declarative correction rules for one map asset.
//!
//! A [`CorrectionTable`] is an ordered list of [`CorrectionRule`]s, each
//! tied to a [`Zone`] and covering either the whole zone or a landmark
//! anchor. One matcher evaluates every rule; anchors win over the zone's
//! general offset. Offsets are pixels of the table's reference map size.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::point::{GeoPoint, MapDims};
use crate::projector::{base_xy, project_with};
use crate::zone::Zone;

/// Horizontal shift of the whole map asset, reference pixels.
pub const GLOBAL_OFFSET_X: f64 = 27.0;

/// A landmark measured on the 1000 × 507.209 world map, with the anchor
/// radius its correction covers.
struct Measured {
    name: &'static str,
    zone: Zone,
    lat: f64,
    lng: f64,
    x: f64,
    y: f64,
    radius: (f64, f64),
}

const MEASURED: [Measured; 2] = [
    Measured {
        name: "london",
        zone: Zone::Europe,
        lat: 51.5074,
        lng: -0.1278,
        x: 472.6,
        y: 53.7,
        radius: (2.0, 2.0),
    },
    Measured {
        name: "new_york",
        zone: Zone::NorthAmerica,
        lat: 40.7128,
        lng: -74.006,
        x: 286.4,
        y: 116.4,
        radius: (5.0, 10.0),
    },
];

/// Part of a zone a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Region {
    /// The zone's full bounding box.
    Zone,
    /// Points within the given latitude and longitude distance of a landmark.
    Anchor {
        lat: f64,
        lng: f64,
        lat_radius_deg: f64,
        lng_radius_deg: f64,
    },
}

impl Region {
    pub fn contains(&self, p: &GeoPoint) -> bool {
        match *self {
            Self::Zone => true,
            Self::Anchor {
                lat,
                lng,
                lat_radius_deg,
                lng_radius_deg,
            } => {
                let dlng = (p.lng() - lng + 540.0).rem_euclid(360.0) - 180.0;
                (p.lat() - lat).abs() < lat_radius_deg && dlng.abs() < lng_radius_deg
            }
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::Anchor { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRule {
    pub name: String,
    pub zone: Zone,
    pub region: Region,
    /// Pixel offset at the reference map size.
    pub dx: f64,
    pub dy: f64,
}

impl CorrectionRule {
    fn anchor(
        name: &str,
        zone: Zone,
        (lat, lng): (f64, f64),
        radius: (f64, f64),
        d: (f64, f64),
    ) -> Self {
        Self {
            name: name.to_string(),
            zone,
            region: Region::Anchor {
                lat,
                lng,
                lat_radius_deg: radius.0,
                lng_radius_deg: radius.1,
            },
            dx: d.0,
            dy: d.1,
        }
    }

    fn general(name: &str, zone: Zone, dx: f64, dy: f64) -> Self {
        Self {
            name: name.to_string(),
            zone,
            region: Region::Zone,
            dx,
            dy,
        }
    }
}

/// A landmark whose true pixel position on the map asset was measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub location: GeoPoint,
    pub x: f64,
    pub y: f64,
}

impl ReferencePoint {
    pub fn new(name: &str, location: GeoPoint, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            location,
            x,
            y,
        }
    }

    /// Measured positions on the reference world map.
    pub fn defaults() -> Vec<Self> {
        MEASURED
            .iter()
            .filter_map(|m| {
                GeoPoint::new(m.lat, m.lng)
                    .ok()
                    .map(|p| Self::new(m.name, p, m.x, m.y))
            })
            .collect()
    }
}

/// Settings for [`CorrectionTable::calibrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub dims: MapDims,
    pub global_offset_x: f64,
    pub anchor_lat_radius_deg: f64,
    pub anchor_lng_radius_deg: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            dims: MapDims::REFERENCE,
            global_offset_x: GLOBAL_OFFSET_X,
            anchor_lat_radius_deg: 5.0,
            anchor_lng_radius_deg: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationEntry {
    pub name: String,
    pub zone: Zone,
    pub expected_x: f64,
    pub expected_y: f64,
    pub x: f64,
    pub y: f64,
    /// Euclidean pixel error.
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub entries: Vec<ValidationEntry>,
    pub mean_error: f64,
    pub max_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionTable {
    pub reference_width: f64,
    pub reference_height: f64,
    /// Subtracted from every x, reference pixels.
    pub global_offset_x: f64,
    pub rules: Vec<CorrectionRule>,
}

impl Default for CorrectionTable {
    /// Table for the 1000 × 507.209 world map: one anchor per measured
    /// landmark, offset by its residual against the base projection. Zones
    /// without measurements stay uncorrected.
    fn default() -> Self {
        let mut table = Self::uncorrected();
        let dims = MapDims::REFERENCE;
        for m in &MEASURED {
            let Ok(p) = GeoPoint::new(m.lat, m.lng) else {
                continue;
            };
            let (bx, by) = base_xy(&table, &p, dims);
            table.rules.push(CorrectionRule::anchor(
                m.name,
                m.zone,
                (m.lat, m.lng),
                m.radius,
                (m.x - bx, m.y - by),
            ));
        }
        table
    }
}

impl CorrectionTable {
    /// A table with no rules: base projection and global offset only.
    pub fn uncorrected() -> Self {
        Self {
            reference_width: MapDims::REFERENCE.width(),
            reference_height: MapDims::REFERENCE.height(),
            global_offset_x: GLOBAL_OFFSET_X,
            rules: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.reference_width.is_finite() || self.reference_width <= 0.0 {
            return Err("reference_width must be positive");
        }
        if !self.reference_height.is_finite() || self.reference_height <= 0.0 {
            return Err("reference_height must be positive");
        }
        if !self.global_offset_x.is_finite() {
            return Err("global_offset_x must be finite");
        }
        for rule in &self.rules {
            if !rule.dx.is_finite() || !rule.dy.is_finite() {
                return Err("rule offsets must be finite");
            }
            if rule.zone == Zone::Fallback {
                return Err("rules cannot target the fallback zone");
            }
            if let Region::Anchor {
                lat,
                lng,
                lat_radius_deg,
                lng_radius_deg,
            } = rule.region
            {
                if GeoPoint::new(lat, lng).is_err() {
                    return Err("anchor coordinate out of range");
                }
                if !lat_radius_deg.is_finite()
                    || !lng_radius_deg.is_finite()
                    || lat_radius_deg <= 0.0
                    || lng_radius_deg <= 0.0
                {
                    return Err("anchor radii must be positive");
                }
            }
        }
        Ok(())
    }

    /// The rule for `p` in `zone`: the first anchor containing it, else
    /// the first zone-wide rule.
    pub fn matching_rule(&self, zone: Zone, p: &GeoPoint) -> Option<&CorrectionRule> {
        let in_zone = || self.rules.iter().filter(move |r| r.zone == zone);
        in_zone()
            .find(|r| r.region.is_anchor() && r.region.contains(p))
            .or_else(|| in_zone().find(|r| !r.region.is_anchor()))
    }

    /// Derive a table from measured reference points.
    ///
    /// Each point becomes an anchor whose offset is its residual
    /// (measured − base projection). Each zone with points gets a general
    /// offset equal to the mean residual of its points, the least-squares
    /// constant offset. Points outside every zone are ignored.
    pub fn calibrate(
        points: &[ReferencePoint],
        calibration: &Calibration,
    ) -> Result<Self, GeoError> {
        let mut table = Self {
            reference_width: calibration.dims.width(),
            reference_height: calibration.dims.height(),
            global_offset_x: calibration.global_offset_x,
            rules: Vec::new(),
        };
        table.validate().map_err(GeoError::InvalidTable)?;

        let mut sums: Vec<(Zone, f64, f64, usize)> = Vec::new();
        for rp in points {
            if !rp.x.is_finite() || !rp.y.is_finite() {
                return Err(GeoError::InvalidPixel { x: rp.x, y: rp.y });
            }
            let zone = Zone::classify(&rp.location);
            if zone == Zone::Fallback {
                log::warn!("reference point {} lies outside every zone, skipped", rp.name);
                continue;
            }
            let (bx, by) = base_xy(&table, &rp.location, calibration.dims);
            let (dx, dy) = (rp.x - bx, rp.y - by);
            table.rules.push(CorrectionRule::anchor(
                &rp.name,
                zone,
                (rp.location.lat(), rp.location.lng()),
                (
                    calibration.anchor_lat_radius_deg,
                    calibration.anchor_lng_radius_deg,
                ),
                (dx, dy),
            ));
            match sums.iter_mut().find(|s| s.0 == zone) {
                Some(s) => {
                    s.1 += dx;
                    s.2 += dy;
                    s.3 += 1;
                }
                None => sums.push((zone, dx, dy, 1)),
            }
        }
        for (zone, sx, sy, n) in sums {
            let n = n as f64;
            table
                .rules
                .push(CorrectionRule::general(zone.name(), zone, sx / n, sy / n));
        }

        table.validate().map_err(GeoError::InvalidTable)?;
        Ok(table)
    }

    /// Project every reference point and report the pixel error.
    pub fn validate_against(&self, points: &[ReferencePoint], dims: MapDims) -> ValidationReport {
        let entries: Vec<ValidationEntry> = points
            .iter()
            .map(|rp| {
                let p = project_with(self, &rp.location, dims);
                ValidationEntry {
                    name: rp.name.clone(),
                    zone: p.zone,
                    expected_x: rp.x,
                    expected_y: rp.y,
                    x: p.x,
                    y: p.y,
                    error: (p.x - rp.x).hypot(p.y - rp.y),
                }
            })
            .collect();
        let max_error = entries.iter().map(|e| e.error).fold(0.0, f64::max);
        let mean_error = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.error).sum::<f64>() / entries.len() as f64
        };
        ValidationReport {
            entries,
            mean_error,
            max_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gp(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn default_table_valid() {
        assert!(CorrectionTable::default().validate().is_ok());
    }

    #[test]
    fn anchor_wraps_longitude() {
        let r = Region::Anchor {
            lat: 0.0,
            lng: 179.0,
            lat_radius_deg: 1.0,
            lng_radius_deg: 3.0,
        };
        assert!(r.contains(&gp(0.5, -179.0)));
        assert!(!r.contains(&gp(0.5, -177.0)));
        assert!(!r.contains(&gp(1.5, 179.0)));
    }

    fn rule_for(table: &CorrectionTable, zone: Zone, lat: f64, lng: f64) -> Option<&str> {
        let rule = table.matching_rule(zone, &gp(lat, lng))?;
        Some(rule.name.as_str())
    }

    #[test]
    fn anchor_beats_general_regardless_of_order() {
        let mut table = CorrectionTable::default();
        let general = CorrectionRule::general("north_america", Zone::NorthAmerica, 15.0, -10.0);
        table.rules.push(general);
        table.rules.reverse();
        let t = &table;
        assert_eq!(rule_for(t, Zone::NorthAmerica, 40.0, -74.0), Some("new_york"));
        assert_eq!(rule_for(t, Zone::NorthAmerica, 50.0, -100.0), Some("north_america"));
    }

    #[test]
    fn europe_outside_london_has_no_rule() {
        let t = &CorrectionTable::default();
        assert_eq!(rule_for(t, Zone::Europe, 48.85, 2.35), None);
        assert_eq!(rule_for(t, Zone::Fallback, 85.0, 0.0), None);
    }

    #[test]
    fn unmeasured_zones_stay_uncorrected() {
        let t = &CorrectionTable::default();
        let names: Vec<&str> = t.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["london", "new_york"]);
        assert!(t.rules.iter().all(|r| r.region.is_anchor()));
        assert_eq!(rule_for(t, Zone::Asia, 35.68, 139.65), None);
        assert_eq!(rule_for(t, Zone::Pacific, -41.29, 174.78), None);
        assert_eq!(rule_for(t, Zone::SouthAmerica, -34.9, -56.16), None);
        assert_eq!(rule_for(t, Zone::NorthAmerica, 50.0, -100.0), None);
    }

    #[test]
    fn default_anchors_match_calibrated_anchors() {
        let points = ReferencePoint::defaults();
        let calibrated = CorrectionTable::calibrate(&points, &Calibration::default()).unwrap();
        for rule in &CorrectionTable::default().rules {
            let c = calibrated.rules.iter().find(|r| r.name == rule.name);
            let c = c.unwrap();
            assert!((c.dx - rule.dx).abs() < 1e-9, "{}", rule.name);
            assert!((c.dy - rule.dy).abs() < 1e-9, "{}", rule.name);
        }
    }

    #[test]
    fn fallback_rule_rejected() {
        let mut table = CorrectionTable::uncorrected();
        let rule = CorrectionRule::general("x", Zone::Fallback, 1.0, 1.0);
        table.rules.push(rule);
        assert!(table.validate().is_err());
    }

    #[test]
    fn zero_radius_rejected() {
        let mut table = CorrectionTable::uncorrected();
        table.rules.push(CorrectionRule::anchor(
            "x",
            Zone::Asia,
            (10.0, 100.0),
            (0.0, 1.0),
            (1.0, 1.0),
        ));
        assert!(table.validate().is_err());
    }

    #[test]
    fn calibration_reproduces_reference_points() {
        let points = ReferencePoint::defaults();
        let table = CorrectionTable::calibrate(&points, &Calibration::default()).unwrap();
        let report = table.validate_against(&points, MapDims::REFERENCE);
        assert_eq!(report.entries.len(), 2);
        assert!(report.max_error < 1e-9, "max error {}", report.max_error);
        // One anchor per point plus a general rule per zone
        assert_eq!(table.rules.len(), 4);
    }

    #[test]
    fn calibrated_zone_offset_is_mean_residual() {
        let dims = MapDims::REFERENCE;
        let a = gp(30.0, 100.0);
        let b = gp(50.0, 80.0);
        let base = CorrectionTable::uncorrected();
        let (ax, ay) = base_xy(&base, &a, dims);
        let (bx, by) = base_xy(&base, &b, dims);
        let points = vec![
            ReferencePoint::new("a", a, ax + 10.0, ay - 4.0),
            ReferencePoint::new("b", b, bx - 2.0, by + 2.0),
        ];
        let table = CorrectionTable::calibrate(&points, &Calibration::default()).unwrap();
        let general = table
            .rules
            .iter()
            .find(|r| r.zone == Zone::Asia && r.region == Region::Zone)
            .unwrap();
        assert!((general.dx - 4.0).abs() < 1e-9);
        assert!((general.dy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn calibration_skips_unzoned_points() {
        let points = vec![ReferencePoint::new("pole", gp(89.0, 0.0), 500.0, 1.0)];
        let table = CorrectionTable::calibrate(&points, &Calibration::default()).unwrap();
        assert!(table.rules.is_empty());
    }

    #[test]
    fn default_table_validates_against_london() {
        let report = CorrectionTable::default()
            .validate_against(&ReferencePoint::defaults(), MapDims::REFERENCE);
        assert!(
            report.entries[0].error < 1e-9,
            "london error {}",
            report.entries[0].error
        );
        assert!(report.max_error < 1e-9);
    }

    #[test]
    fn table_json_roundtrip_keeps_rule_order() {
        let table = CorrectionTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: CorrectionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        let names: Vec<&str> = back.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names[0], "london");
    }
}
