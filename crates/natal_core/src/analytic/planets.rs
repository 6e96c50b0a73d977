//! Major planets from approximate Keplerian elements with linear rates.
//!
//! Source: Standish, "Keplerian Elements for Approximate Positions of the
//! Major Planets" (JPL SSD), Table 1, valid 1800–2050 AD. Elements refer
//! to the J2000 ecliptic and equinox. Typical error is well under a tenth
//! of a degree for the inner planets and a few tenths for the outer ones
//! near the ends of the range.

use natal_frames::spherical::{norm, sub};
use natal_frames::{cartesian_to_spherical, precess_longitude_from_j2000};
use natal_orbit::{KeplerConfig, orbit_to_ecliptic, solve_kepler, true_anomaly_rad};

use crate::body::Body;
use crate::provider::EclipticPosition;

/// Light travel time for one astronomical unit, in days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Element values at J2000 and their rates per Julian century.
///
/// Order: a (AU), e, I, L, ϖ, Ω (degrees).
struct ElementRow {
    at_epoch: [f64; 6],
    per_century: [f64; 6],
}

#[rustfmt::skip]
const MERCURY: ElementRow = ElementRow {
    at_epoch: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    per_century: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};

#[rustfmt::skip]
const VENUS: ElementRow = ElementRow {
    at_epoch: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    per_century: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};

#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: ElementRow = ElementRow {
    at_epoch: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    per_century: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

#[rustfmt::skip]
const MARS: ElementRow = ElementRow {
    at_epoch: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    per_century: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};

#[rustfmt::skip]
const JUPITER: ElementRow = ElementRow {
    at_epoch: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    per_century: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};

#[rustfmt::skip]
const SATURN: ElementRow = ElementRow {
    at_epoch: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    per_century: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};

#[rustfmt::skip]
const URANUS: ElementRow = ElementRow {
    at_epoch: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    per_century: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};

#[rustfmt::skip]
const NEPTUNE: ElementRow = ElementRow {
    at_epoch: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    per_century: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};

#[rustfmt::skip]
const PLUTO: ElementRow = ElementRow {
    at_epoch: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    per_century: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

fn row_for(body: Body) -> Option<&'static ElementRow> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Sun | Body::Moon => None,
    }
}

/// Heliocentric J2000 ecliptic position (AU) from one element row.
fn heliocentric(row: &ElementRow, t: f64, kepler: &KeplerConfig) -> [f64; 3] {
    let el: [f64; 6] = std::array::from_fn(|i| row.at_epoch[i] + row.per_century[i] * t);
    let [a, e, incl, mean_lon, peri_lon, node] = el;

    let m = (mean_lon - peri_lon).to_radians();
    let solution = solve_kepler(m, e, kepler);
    let ea = solution.eccentric_anomaly_rad;
    let nu = true_anomaly_rad(e, ea);
    let r = a * (1.0 - e * ea.cos());

    let omega = (peri_lon - node).to_radians();
    orbit_to_ecliptic(r, nu + omega, node.to_radians(), incl.to_radians())
}

/// Earth's heliocentric J2000 position, approximated by the Earth–Moon
/// barycentre (offset at most 4700 km).
pub fn earth_heliocentric(t: f64, kepler: &KeplerConfig) -> [f64; 3] {
    heliocentric(&EARTH_MOON_BARYCENTER, t, kepler)
}

/// Geocentric ecliptic position of date with one light-time iteration.
///
/// Returns `None` for bodies without an element row.
pub fn planet_position(body: Body, t: f64, kepler: &KeplerConfig) -> Option<EclipticPosition> {
    let row = row_for(body)?;
    let earth = earth_heliocentric(t, kepler);

    let geometric = sub(&heliocentric(row, t, kepler), &earth);
    let distance = norm(&geometric);
    let t_emit = t - distance * LIGHT_TIME_DAYS_PER_AU / 36_525.0;
    let apparent = sub(&heliocentric(row, t_emit, kepler), &earth);

    let sph = cartesian_to_spherical(&apparent);
    Some(EclipticPosition {
        lon_deg: precess_longitude_from_j2000(sph.lon_deg, t),
        lat_deg: sph.lat_deg,
        distance_au: sph.distance,
    })
}
