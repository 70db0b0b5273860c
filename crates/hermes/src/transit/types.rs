use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::AspectKind;
use crate::planets::{NatalPoint, Planet};

/// Coarse horizon of a transit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    LongTerm,
    ShortTerm,
    Specific(Planet),
    Mixed,
}

impl Timeframe {
    pub fn for_planet(planet: Planet) -> Timeframe {
        match planet {
            Planet::Sun => Timeframe::LongTerm,
            Planet::Moon => Timeframe::ShortTerm,
            other => Timeframe::Specific(other),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::LongTerm => f.write_str("Long-Term"),
            Timeframe::ShortTerm => f.write_str("Short-Term"),
            Timeframe::Specific(planet) => write!(f, "{}-Specific", planet),
            Timeframe::Mixed => f.write_str("Mixed"),
        }
    }
}

/// One transit planet aspecting one natal point on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub date: NaiveDate,
    pub transit_planet: Planet,
    pub natal_point: NatalPoint,
    pub aspect: AspectKind,
    /// |separation - exact angle|
    pub orb_degree: f64,
    /// 1 - orb_degree / allowed orb
    pub exactness: f64,
    pub polarity: f64,
    pub is_ruling_hit: bool,
    pub is_retrograde: bool,
    pub timeframe: Timeframe,
}

impl RawMatch {
    pub fn is_mercury_retrograde(&self) -> bool {
        self.is_retrograde && self.transit_planet == Planet::Mercury
    }
}

/// Scored aggregate of all matches on one (date, natal point)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySignificance {
    pub date: NaiveDate,
    pub natal_point: NatalPoint,
    pub transit_count: usize,
    pub is_ruling_hit: bool,
    pub mercury_retrograde: bool,
    pub timeframe: Timeframe,
    pub score: f64,
    /// Smallest orb among the contributing matches
    pub orb_degree: f64,
    /// Human readable list of the contributing matches, tightest first
    pub transits: String,
    pub interpretation: String,
    /// Transit planet of the tightest match
    pub transit_planet: Planet,
    /// Aspect of the tightest match
    pub aspect: AspectKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrogradeWindow {
    pub planet: Planet,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub peak: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectWindow {
    pub transit_planet: Planet,
    pub natal_point: NatalPoint,
    pub aspect: AspectKind,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub peak: NaiveDate,
    pub peak_orb: f64,
    pub score: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Window {
    Retrograde(RetrogradeWindow),
    Aspect(AspectWindow),
}

impl Window {
    pub fn start(&self) -> NaiveDate {
        match self {
            Window::Retrograde(w) => w.start,
            Window::Aspect(w) => w.start,
        }
    }

    pub fn end(&self) -> NaiveDate {
        match self {
            Window::Retrograde(w) => w.end,
            Window::Aspect(w) => w.end,
        }
    }

    pub fn peak(&self) -> NaiveDate {
        match self {
            Window::Retrograde(w) => w.peak,
            Window::Aspect(w) => w.peak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_labels() {
        assert_eq!(Timeframe::for_planet(Planet::Sun).to_string(), "Long-Term");
        assert_eq!(Timeframe::for_planet(Planet::Moon).to_string(), "Short-Term");
        assert_eq!(Timeframe::for_planet(Planet::Mars).to_string(), "Mars-Specific");
        assert_eq!(Timeframe::Mixed.to_string(), "Mixed");
    }
}
