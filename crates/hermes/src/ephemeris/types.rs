use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planets::Planet;

/// Julian day of 1970-01-01T00:00 UTC
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {planet} at JD {jd}: {message}")]
    CalculationFailed {
        planet: Planet,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(pub f64);

impl JulianDay {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Civil UTC date containing this instant.
    pub fn date(self) -> Option<NaiveDate> {
        let days = (self.0 - UNIX_EPOCH_JD).floor() as i64;
        NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(Duration::days(days))
    }
}

/// Position of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Speed in longitude (degrees per day), when requested
    pub speed_lon: Option<f64>,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed_lon.map_or(false, |speed| speed < 0.0)
    }
}

/// Chart angles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub asc: f64,
    pub mc: f64,
}

/// Source of planetary longitudes and house angles.
///
/// Implementations must be pure with respect to their inputs: asking the same
/// question twice gives the same answer.
pub trait EphemerisProvider {
    fn to_julian_day(&self, year: i32, month: u32, day: u32, hour_utc: f64) -> JulianDay;

    fn body_position(
        &self,
        jd: JulianDay,
        planet: Planet,
        want_speed: bool,
    ) -> Result<BodyPosition, EphemerisError>;

    fn houses(&self, jd: JulianDay, location: GeoLocation) -> Result<Angles, EphemerisError>;
}

/// Julian day for a UTC civil date-time through the provider.
pub fn julian_day_for<P: EphemerisProvider + ?Sized>(
    provider: &P,
    utc: NaiveDateTime,
) -> JulianDay {
    let hour = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    provider.to_julian_day(utc.year(), utc.month(), utc.day(), hour)
}

/// Gregorian calendar date to Julian day (Meeus, ch. 7).
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour_utc: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour_utc / 24.0
}
