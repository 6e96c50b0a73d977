//! Frame conversion helpers.
//!
//! Provides coordinate frame rotations (ecliptic ↔ equatorial of date),
//! precession of ecliptic longitudes, and coordinate system conversions
//! (Cartesian ↔ spherical).

pub mod obliquity;
pub mod precession;
pub mod rotation;
pub mod spherical;

pub use obliquity::{OBLIQUITY_J2000_DEG, mean_obliquity_deg};
pub use precession::{
    general_precession_longitude_arcsec, general_precession_longitude_deg,
    precess_longitude_from_j2000,
};
pub use rotation::{
    EquatorialCoords, ecliptic_to_equatorial, ecliptic_vec_to_equatorial, equatorial_to_ecliptic,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian, wrap_360};
