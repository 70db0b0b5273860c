//! Canned ephemeris for deterministic replays.
//!
//! Positions come from an explicit (planet, date) table first and fall back to
//! a linear motion model anchored at a reference Julian day.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::ephemeris::types::{
    gregorian_julian_day, Angles, BodyPosition, EphemerisError, EphemerisProvider, GeoLocation,
    JulianDay,
};
use crate::planets::Planet;
use crate::zodiac::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearMotion {
    epoch: JulianDay,
    lon_at_epoch: f64,
    speed: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TableEphemeris {
    positions: HashMap<(Planet, NaiveDate), BodyPosition>,
    motions: HashMap<Planet, LinearMotion>,
    angles: Option<Angles>,
}

impl TableEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ascendant and midheaven returned for every `houses` call.
    pub fn with_angles(mut self, asc: f64, mc: f64) -> Self {
        self.angles = Some(Angles {
            asc: normalize_degrees(asc),
            mc: normalize_degrees(mc),
        });
        self
    }

    /// Fixed position of `planet` for the whole of `date`.
    pub fn with_position(mut self, planet: Planet, date: NaiveDate, lon: f64, speed: f64) -> Self {
        self.insert_position(planet, date, lon, speed);
        self
    }

    pub fn insert_position(&mut self, planet: Planet, date: NaiveDate, lon: f64, speed: f64) {
        self.positions.insert(
            (planet, date),
            BodyPosition {
                lon: normalize_degrees(lon),
                speed_lon: Some(speed),
            },
        );
    }

    /// Constant-speed motion: `lon = lon_at_epoch + speed * (jd - epoch)`.
    pub fn with_motion(mut self, planet: Planet, epoch: NaiveDate, lon_at_epoch: f64, speed: f64) -> Self {
        let epoch = JulianDay(gregorian_julian_day(epoch.year(), epoch.month(), epoch.day(), 0.0));
        self.motions.insert(
            planet,
            LinearMotion {
                epoch,
                lon_at_epoch,
                speed,
            },
        );
        self
    }

    fn lookup(&self, jd: JulianDay, planet: Planet) -> Option<BodyPosition> {
        if let Some(position) = jd.date().and_then(|date| self.positions.get(&(planet, date))) {
            return Some(*position);
        }
        self.motions.get(&planet).map(|motion| BodyPosition {
            lon: normalize_degrees(motion.lon_at_epoch + motion.speed * (jd.0 - motion.epoch.0)),
            speed_lon: Some(motion.speed),
        })
    }
}

impl EphemerisProvider for TableEphemeris {
    fn to_julian_day(&self, year: i32, month: u32, day: u32, hour_utc: f64) -> JulianDay {
        JulianDay(gregorian_julian_day(year, month, day, hour_utc))
    }

    fn body_position(
        &self,
        jd: JulianDay,
        planet: Planet,
        want_speed: bool,
    ) -> Result<BodyPosition, EphemerisError> {
        let position = self
            .lookup(jd, planet)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                planet,
                jd: jd.0,
                message: "no canned position".to_string(),
            })?;
        Ok(BodyPosition {
            lon: position.lon,
            speed_lon: if want_speed { position.speed_lon } else { None },
        })
    }

    fn houses(&self, _jd: JulianDay, _location: GeoLocation) -> Result<Angles, EphemerisError> {
        self.angles
            .ok_or_else(|| EphemerisError::HouseCalculationFailed {
                message: "no canned angles".to_string(),
            })
    }
}
