//! Zodiac signs and their rulers.
//!
//! Signs are 30° segments of the ecliptic starting at 0° Aries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::planets::Planet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
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

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// Wrap any longitude into [0, 360).
pub fn normalize_degrees(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    // rem_euclid can round up to 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl Sign {
    pub fn from_longitude(longitude: f64) -> Sign {
        let index = (normalize_degrees(longitude) / 30.0) as usize;
        SIGN_ORDER[index % 12]
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Ruling planet of the sign.
    ///
    /// Uses the modern rulers for Scorpio, Aquarius and Pisces.
    pub fn ruler(self) -> Planet {
        match self {
            Sign::Aries => Planet::Mars,
            Sign::Taurus => Planet::Venus,
            Sign::Gemini => Planet::Mercury,
            Sign::Cancer => Planet::Moon,
            Sign::Leo => Planet::Sun,
            Sign::Virgo => Planet::Mercury,
            Sign::Libra => Planet::Venus,
            Sign::Scorpio => Planet::Pluto,
            Sign::Sagittarius => Planet::Jupiter,
            Sign::Capricorn => Planet::Saturn,
            Sign::Aquarius => Planet::Uranus,
            Sign::Pisces => Planet::Neptune,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
