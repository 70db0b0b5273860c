//! Day-by-day transit detection against a natal chart.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::aspects::AspectCalculator;
use crate::chart::{NatalChart, ReferencePoint};
use crate::ephemeris::EphemerisProvider;
use crate::error::{InputError, Result};
use crate::planets::{NatalPoint, Planet};
use crate::transit::types::{RawMatch, Timeframe};

/// Transit positions are sampled at noon UTC.
pub const SCAN_HOUR_UTC: f64 = 12.0;
/// A Moon match must be at least this exact to be kept on its own merit.
pub const MOON_EXACTNESS_GATE: f64 = 0.97;

/// What to scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
    /// Multiplies every aspect's base orb
    pub orb_days: f64,
    pub planets: Vec<Planet>,
    /// `None` evaluates every chart point
    pub points: Option<Vec<NatalPoint>>,
}

impl ScanRequest {
    pub fn validate(&self) -> std::result::Result<(), InputError> {
        if self.start > self.end {
            return Err(InputError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if !(self.orb_days.is_finite() && self.orb_days > 0.0) {
            return Err(InputError::NonPositiveOrb(self.orb_days));
        }
        Ok(())
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        day_range(self.start, self.end)
    }
}

/// Every calendar day in `start..=end`.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Transit body state for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPosition {
    pub longitude: f64,
    pub retrograde: bool,
}

/// Build the match for one transit planet against one natal point, if any
/// aspect is within orb.
pub fn evaluate_pair(
    calculator: &AspectCalculator,
    date: NaiveDate,
    planet: Planet,
    position: DailyPosition,
    point: &ReferencePoint,
    orb_days: f64,
    ruling_planet: Planet,
) -> Option<RawMatch> {
    let orb_scale = planet.orb_multiplier() * orb_days;
    let hit = calculator.best_aspect(position.longitude, point.longitude, orb_scale)?;

    Some(RawMatch {
        date,
        transit_planet: planet,
        natal_point: point.point,
        aspect: hit.definition.kind,
        orb_degree: hit.orb_diff,
        exactness: hit.exactness(),
        polarity: hit.definition.polarity,
        is_ruling_hit: point.point.is_ruled_by(ruling_planet),
        is_retrograde: position.retrograde,
        timeframe: Timeframe::for_planet(planet),
    })
}

/// Whether a match survives the Moon gate.
///
/// Non-Moon matches always pass. The Mercury-retrograde clause can never hold
/// for a Moon match and is kept as written.
pub fn passes_moon_gate(m: &RawMatch) -> bool {
    m.transit_planet != Planet::Moon
        || m.exactness > MOON_EXACTNESS_GATE
        || m.is_ruling_hit
        || (m.is_retrograde && m.transit_planet == Planet::Mercury)
}

pub struct TransitScanner<'a, P: ?Sized> {
    chart: &'a NatalChart,
    provider: &'a P,
    calculator: AspectCalculator,
    cache: HashMap<(Planet, NaiveDate), DailyPosition>,
}

impl<'a, P: EphemerisProvider + ?Sized> TransitScanner<'a, P> {
    pub fn new(chart: &'a NatalChart, provider: &'a P) -> Self {
        Self {
            chart,
            provider,
            calculator: AspectCalculator::new(),
            cache: HashMap::new(),
        }
    }

    pub fn with_calculator(mut self, calculator: AspectCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Number of (planet, day) positions fetched so far.
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    /// Position and retrograde state of `planet` at noon UTC on `date`,
    /// fetched from the provider at most once per run.
    pub fn daily_position(&mut self, planet: Planet, date: NaiveDate) -> Result<DailyPosition> {
        if let Some(position) = self.cache.get(&(planet, date)) {
            return Ok(*position);
        }

        let jd = self
            .provider
            .to_julian_day(date.year(), date.month(), date.day(), SCAN_HOUR_UTC);
        let body = self.provider.body_position(jd, planet, true)?;
        let position = DailyPosition {
            longitude: body.lon,
            retrograde: body.is_retrograde(),
        };
        self.cache.insert((planet, date), position);
        Ok(position)
    }

    /// Scan every day of the request.
    ///
    /// Matches come out ordered by date, then requested planet order, then
    /// chart point order.
    pub fn scan(&mut self, request: &ScanRequest) -> Result<Vec<RawMatch>> {
        request.validate()?;

        let points = self.chart.select_points(request.points.as_deref());
        let ruling_planet = self.chart.ruling_planet();
        let mut matches = Vec::new();
        let mut found = 0usize;

        for date in request.days() {
            for &planet in &request.planets {
                let position = self.daily_position(planet, date)?;
                for point in &points {
                    let Some(m) = evaluate_pair(
                        &self.calculator,
                        date,
                        planet,
                        position,
                        point,
                        request.orb_days,
                        ruling_planet,
                    ) else {
                        continue;
                    };
                    found += 1;
                    if passes_moon_gate(&m) {
                        matches.push(m);
                    }
                }
            }
        }

        log::debug!("Raw transit events found: {}", found);
        log::debug!("Transit events after Moon gate: {}", matches.len());
        Ok(matches)
    }

    /// Every date in `start..=end` on which `planet` moves backwards.
    pub fn find_retrograde_days(
        &mut self,
        planet: Planet,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        if start > end {
            return Err(InputError::InvalidRange { start, end }.into());
        }

        let mut days = Vec::new();
        for date in day_range(start, end) {
            if self.daily_position(planet, date)?.retrograde {
                days.push(date);
            }
        }
        Ok(days)
    }
}
