//! Moving bodies and natal reference points.
//!
//! Both are closed enums; every per-body table lookup is an explicit `match`
//! with a visible default arm.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Bodies that are placed in a natal chart and can be scanned as transits.
pub const TRACKED_PLANETS: [Planet; 7] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Neptune,
];

/// Transit bodies used when the caller names none.
pub const DEFAULT_TRANSIT_PLANETS: [Planet; 2] = [Planet::Sun, Planet::Moon];

impl Planet {
    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    pub fn is_tracked(self) -> bool {
        TRACKED_PLANETS.contains(&self)
    }

    /// Scales every aspect's base orb when this body is the transit.
    pub fn orb_multiplier(self) -> f64 {
        match self {
            Planet::Moon => 0.8,
            Planet::Sun | Planet::Venus => 2.2,
            Planet::Mars | Planet::Mercury => 1.5,
            Planet::Jupiter | Planet::Neptune => 1.7,
            _ => 1.0,
        }
    }

    /// Base weight of a match in the significance score.
    pub fn weight(self) -> f64 {
        match self {
            Planet::Sun => 2.0,
            Planet::Moon => 0.4,
            Planet::Venus | Planet::Mercury => 0.5,
            Planet::Mars => 1.2,
            Planet::Jupiter => 1.0,
            Planet::Neptune => 0.8,
            _ => 1.0,
        }
    }

    /// Parse a list of transit body names.
    ///
    /// An empty list means Sun and Moon. Otherwise unknown or untracked names
    /// are skipped and duplicates collapse onto their first occurrence, so a
    /// list of only unknown names scans nothing.
    pub fn parse_tracked_list<S: AsRef<str>>(names: &[S]) -> Vec<Planet> {
        if names.is_empty() {
            return DEFAULT_TRANSIT_PLANETS.to_vec();
        }

        let mut planets = Vec::new();
        for name in names {
            match name.as_ref().parse::<Planet>() {
                Ok(planet) if planet.is_tracked() => {
                    if !planets.contains(&planet) {
                        planets.push(planet);
                    }
                }
                _ => log::debug!("Ignoring transit planet '{}'", name.as_ref()),
            }
        }
        planets
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sun" => Ok(Planet::Sun),
            "moon" => Ok(Planet::Moon),
            "mercury" => Ok(Planet::Mercury),
            "venus" => Ok(Planet::Venus),
            "mars" => Ok(Planet::Mars),
            "jupiter" => Ok(Planet::Jupiter),
            "saturn" => Ok(Planet::Saturn),
            "uranus" => Ok(Planet::Uranus),
            "neptune" => Ok(Planet::Neptune),
            "pluto" => Ok(Planet::Pluto),
            _ => Err(InputError::UnknownPlanet(s.to_string())),
        }
    }
}

/// A named point of the natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NatalPoint {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Neptune,
    Ascendant,
    Midheaven,
}

impl NatalPoint {
    /// Canonical chart order: tracked planets, then the two angles.
    pub const ALL: [NatalPoint; 9] = [
        NatalPoint::Sun,
        NatalPoint::Moon,
        NatalPoint::Mercury,
        NatalPoint::Venus,
        NatalPoint::Mars,
        NatalPoint::Jupiter,
        NatalPoint::Neptune,
        NatalPoint::Ascendant,
        NatalPoint::Midheaven,
    ];

    pub fn name(self) -> &'static str {
        match self.planet() {
            Some(planet) => planet.name(),
            None if self == NatalPoint::Ascendant => "Ascendant",
            None => "Midheaven",
        }
    }

    /// The planet behind this point, `None` for the angles.
    pub fn planet(self) -> Option<Planet> {
        match self {
            NatalPoint::Sun => Some(Planet::Sun),
            NatalPoint::Moon => Some(Planet::Moon),
            NatalPoint::Mercury => Some(Planet::Mercury),
            NatalPoint::Venus => Some(Planet::Venus),
            NatalPoint::Mars => Some(Planet::Mars),
            NatalPoint::Jupiter => Some(Planet::Jupiter),
            NatalPoint::Neptune => Some(Planet::Neptune),
            NatalPoint::Ascendant | NatalPoint::Midheaven => None,
        }
    }

    pub fn from_planet(planet: Planet) -> Option<NatalPoint> {
        NatalPoint::ALL
            .iter()
            .copied()
            .find(|point| point.planet() == Some(planet))
    }

    pub fn is_ruled_by(self, ruler: Planet) -> bool {
        self.planet() == Some(ruler)
    }

    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<NatalPoint>, InputError> {
        let mut points = Vec::with_capacity(names.len());
        for name in names {
            let point = name.as_ref().parse::<NatalPoint>()?;
            if !points.contains(&point) {
                points.push(point);
            }
        }
        Ok(points)
    }
}

impl fmt::Display for NatalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NatalPoint {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascendant" | "asc" => Ok(NatalPoint::Ascendant),
            "midheaven" | "mc" => Ok(NatalPoint::Midheaven),
            other => other
                .parse::<Planet>()
                .ok()
                .and_then(NatalPoint::from_planet)
                .ok_or_else(|| InputError::UnknownPoint(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracked_list_ignores_unknown() {
        let planets = Planet::parse_tracked_list(&["Sun", "Vulcan", "pluto", "mercury", "Sun"]);
        assert_eq!(planets, vec![Planet::Sun, Planet::Mercury]);
    }

    #[test]
    fn test_parse_tracked_list_all_unknown_is_empty() {
        let planets = Planet::parse_tracked_list(&["Vulcan", "Saturn"]);
        assert!(planets.is_empty());
    }

    #[test]
    fn test_parse_tracked_list_defaults() {
        let planets = Planet::parse_tracked_list::<&str>(&[]);
        assert_eq!(planets, vec![Planet::Sun, Planet::Moon]);
    }

    #[test]
    fn test_natal_point_parse() {
        assert_eq!("asc".parse::<NatalPoint>().unwrap(), NatalPoint::Ascendant);
        assert_eq!("Midheaven".parse::<NatalPoint>().unwrap(), NatalPoint::Midheaven);
        assert_eq!("jupiter".parse::<NatalPoint>().unwrap(), NatalPoint::Jupiter);
        assert!("Saturn".parse::<NatalPoint>().is_err());
    }

    #[test]
    fn test_table_defaults() {
        assert_eq!(Planet::Saturn.orb_multiplier(), 1.0);
        assert_eq!(Planet::Pluto.weight(), 1.0);
        assert_eq!(Planet::Sun.orb_multiplier(), 2.2);
        assert_eq!(Planet::Moon.weight(), 0.4);
    }
}
