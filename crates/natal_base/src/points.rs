//! Derived chart points: mean Black Moon Lilith and the Part of Fortune.

use crate::util::normalize_360;

/// Mean lunar apogee ("Black Moon Lilith"), degrees [0, 360).
///
/// `t` = Julian centuries of TT since J2000.0. Meeus's mean lunar perigee
/// (chapter 47) plus 180°.
pub fn mean_lilith_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_360(
        83.353_246_5 + 4_069.013_728_7 * t - 0.010_320_0 * t2 - t3 / 80_053.0
            + t4 / 18_999_000.0
            + 180.0,
    )
}

/// The Sun is above the horizon when it lies in the half of the ecliptic
/// that has already risen, i.e. up to 180° behind the Ascendant.
pub fn is_day_chart(ascendant: f64, sun: f64) -> bool {
    let behind = normalize_360(ascendant - sun);
    behind > 0.0 && behind < 180.0
}

/// Part of Fortune: ASC + Moon − Sun by day, ASC + Sun − Moon by night.
pub fn part_of_fortune_deg(ascendant: f64, sun: f64, moon: f64) -> f64 {
    if is_day_chart(ascendant, sun) {
        normalize_360(ascendant + moon - sun)
    } else {
        normalize_360(ascendant + sun - moon)
    }
}
