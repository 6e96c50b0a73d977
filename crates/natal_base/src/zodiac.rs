//! Tropical zodiac signs and sign-relative positions.
//!
//! The ecliptic is divided into 12 equal signs of 30° starting from the
//! vernal equinox (0° Aries).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Signs in ecliptic order, index 0 = Aries.
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl ZodiacSign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// 0-based index (Aries = 0 .. Pisces = 11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sign at `index mod 12`.
    pub const fn from_index(index: usize) -> Self {
        ALL_SIGNS[index % 12]
    }

    pub const fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }

    /// Elements cycle fire, earth, air, water from Aries.
    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Modalities cycle cardinal, fixed, mutable from Aries.
    pub const fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// Ecliptic longitude where the sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_SIGNS
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds [0, 60).
    pub seconds: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds of the magnitude.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let arcmin = (d - degrees) * 60.0;
    let minutes = arcmin.floor();
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds: (arcmin - minutes) * 60.0,
    }
}

pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// A longitude expressed as sign plus degrees into the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// Degrees past the start of `sign`, [0, 30).
    pub degree_in_sign: f64,
}

impl ZodiacPosition {
    pub fn dms(&self) -> Dms {
        deg_to_dms(self.degree_in_sign)
    }

    /// Back to an ecliptic longitude in [0, 360).
    pub fn longitude(&self) -> f64 {
        self.sign.start_longitude() + self.degree_in_sign
    }
}

impl Display for ZodiacPosition {
    /// `7°33'12" Virgo`, seconds truncated.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let dms = self.dms();
        write!(
            f,
            "{}°{:02}'{:02}\" {}",
            dms.degrees, dms.minutes, dms.seconds as u8, self.sign
        )
    }
}

/// Map an ecliptic longitude to its sign and degree within the sign.
///
/// Input outside [0, 360) is normalized first, so the result is the same
/// for `L` and `L + 360k`.
pub fn to_zodiac(longitude: f64) -> ZodiacPosition {
    let lon = normalize_360(longitude);
    // min(11) absorbs a longitude a hair under 360 that divides to 12.0
    let idx = ((lon / 30.0).floor() as usize).min(11);
    ZodiacPosition {
        sign: ALL_SIGNS[idx],
        degree_in_sign: lon - idx as f64 * 30.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_SIGNS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert_eq!(ZodiacSign::from_index(i), *s);
        }
        assert_eq!(ZodiacSign::from_index(13), ZodiacSign::Taurus);
    }

    #[test]
    fn elements_and_modalities() {
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Virgo.element(), Element::Earth);
        assert_eq!(ZodiacSign::Aquarius.element(), Element::Air);
        assert_eq!(ZodiacSign::Scorpio.element(), Element::Water);
        assert_eq!(ZodiacSign::Capricorn.modality(), Modality::Cardinal);
        assert_eq!(ZodiacSign::Taurus.modality(), Modality::Fixed);
        assert_eq!(ZodiacSign::Pisces.modality(), Modality::Mutable);
    }

    #[test]
    fn name_lookup() {
        assert_eq!(ZodiacSign::from_name("scorpio"), Some(ZodiacSign::Scorpio));
        assert_eq!(ZodiacSign::from_name("Ophiuchus"), None);
    }

    #[test]
    fn boundaries_belong_to_next_sign() {
        for i in 0..12 {
            let pos = to_zodiac(i as f64 * 30.0);
            assert_eq!(pos.sign.index() as usize, i);
            assert!(pos.degree_in_sign.abs() < 1e-12);
        }
    }

    #[test]
    fn mid_sign() {
        let pos = to_zodiac(154.71);
        assert_eq!(pos.sign, ZodiacSign::Virgo);
        assert!((pos.degree_in_sign - 4.71).abs() < 1e-9);
    }

    #[test]
    fn just_below_360_is_pisces() {
        let pos = to_zodiac(359.999_999_999);
        assert_eq!(pos.sign, ZodiacSign::Pisces);
        assert!(pos.degree_in_sign < 30.0);
    }

    #[test]
    fn negative_and_wrapped_input() {
        let pos = to_zodiac(-10.0);
        assert_eq!(pos.sign, ZodiacSign::Pisces);
        assert!((pos.degree_in_sign - 20.0).abs() < 1e-10);
        assert_eq!(to_zodiac(365.0).sign, ZodiacSign::Aries);
    }

    #[test]
    fn longitude_roundtrip() {
        let pos = to_zodiac(239.448);
        assert!((pos.longitude() - 239.448).abs() < 1e-12);
    }

    #[test]
    fn dms_known_values() {
        let d = deg_to_dms(23.853);
        assert_eq!((d.degrees, d.minutes), (23, 51));
        assert!((d.seconds - 10.8).abs() < 0.01);

        let d = deg_to_dms(10.5);
        assert_eq!((d.degrees, d.minutes), (10, 30));
        assert!(d.seconds.abs() < 0.01);
        assert!((dms_to_deg(&d) - 10.5).abs() < 1e-12);
    }

    #[test]
    fn display_format() {
        let pos = to_zodiac(157.5);
        assert_eq!(pos.to_string(), "7°30'00\" Virgo");
    }
}
