//! Geocentric Moon from a truncated analytic lunar theory.
//!
//! Longitude and latitude: Montenbruck & Pfleger, _Astronomy on the
//! Personal Computer_, §3.2, good to a few arcminutes. Distance: leading
//! terms of Meeus chapter 47. Angles refer to the mean equinox of date.

use std::f64::consts::TAU;

const ARCSEC_PER_RAD: f64 = 206_264.806_247_096_36;
const KM_PER_AU: f64 = 149_597_870.7;

fn frac(x: f64) -> f64 {
    x - x.floor()
}

/// `(longitude_deg, latitude_deg, distance_au)` for `t` Julian centuries TT.
pub fn moon_position(t: f64) -> (f64, f64, f64) {
    let l0 = frac(0.606_433 + 1_336.855_225 * t);
    let l = TAU * frac(0.374_897 + 1_325.552_410 * t);
    let ls = TAU * frac(0.993_133 + 99.997_361 * t);
    let d = TAU * frac(0.827_361 + 1_236.853_086 * t);
    let f = TAU * frac(0.259_086 + 1_342.227_825 * t);

    let dl = 22_640.0 * l.sin()
        - 4_586.0 * (l - 2.0 * d).sin()
        + 2_370.0 * (2.0 * d).sin()
        + 769.0 * (2.0 * l).sin()
        - 668.0 * ls.sin()
        - 412.0 * (2.0 * f).sin()
        - 212.0 * (2.0 * l - 2.0 * d).sin()
        - 206.0 * (l + ls - 2.0 * d).sin()
        + 192.0 * (l + 2.0 * d).sin()
        - 165.0 * (ls - 2.0 * d).sin()
        - 125.0 * d.sin()
        - 110.0 * (l + ls).sin()
        + 148.0 * (l - ls).sin()
        - 55.0 * (2.0 * f - 2.0 * d).sin();

    let s = f + (dl + 412.0 * (2.0 * f).sin() + 541.0 * ls.sin()) / ARCSEC_PER_RAD;
    let h = f - 2.0 * d;
    let n = -526.0 * h.sin()
        + 44.0 * (l + h).sin()
        - 31.0 * (-l + h).sin()
        - 23.0 * (ls + h).sin()
        + 11.0 * (-ls + h).sin()
        - 25.0 * (-2.0 * l + f).sin()
        + 21.0 * (-l + f).sin();

    let lon = 360.0 * frac(l0 + dl / 1_296_000.0);
    let lat = ((18_520.0 * s.sin() + n) / ARCSEC_PER_RAD).to_degrees();

    let km = 385_000.56 - 20_905.355 * l.cos() - 3_699.111 * (2.0 * d - l).cos()
        - 2_955.968 * (2.0 * d).cos()
        - 569.925 * (2.0 * l).cos()
        + 246.158 * (2.0 * d - 2.0 * l).cos();

    (lon, lat, km / KM_PER_AU)
}
