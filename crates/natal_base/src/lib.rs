//! Tropical zodiac primitives.
//!
//! Pure functions over ecliptic longitudes: sign lookup, the North/South
//! node pair, the mean lunar node and apogee, chart angles and the Part
//! of Fortune. Nothing here touches an ephemeris.

pub mod angles;
pub mod nodes;
pub mod points;
pub mod util;
pub mod zodiac;

pub use angles::{ChartAngles, ascendant_deg, chart_angles, midheaven_deg};
pub use nodes::{NodeMode, NodePair, mean_north_node_deg};
pub use points::{is_day_chart, mean_lilith_deg, part_of_fortune_deg};
pub use util::{angular_difference, normalize_360};
pub use zodiac::{
    ALL_SIGNS, Dms, Element, Modality, ZodiacPosition, ZodiacSign, deg_to_dms, dms_to_deg,
    to_zodiac,
};
