//! Birth parameters of an instrument and their validation.
//!
//! Nothing here talks to an ephemeris; every malformed input is rejected
//! before a chart is built.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::GeoLocation;
use crate::error::InputError;

pub const DATE_FORMAT: &str = "%Y/%m/%d";
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

lazy_static! {
    static ref COORDINATE_RE: Regex =
        Regex::new(r"^([+-]?\d+(?:\.\d+)?)([NnSsEeWw])$").expect("coordinate pattern");
    static ref UTC_OFFSET_RE: Regex =
        Regex::new(r"^([+-])(\d{1,2}):(\d{2})$").expect("utc offset pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    fn accepts(self, hemisphere: char) -> bool {
        match self {
            Axis::Latitude => matches!(hemisphere, 'N' | 'S'),
            Axis::Longitude => matches!(hemisphere, 'E' | 'W'),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Parse `+HH:MM` / `-HH:MM` into signed fractional hours.
pub fn parse_utc_offset(raw: &str) -> Result<f64, InputError> {
    let invalid = || InputError::InvalidUtcOffset(raw.to_string());
    let caps = UTC_OFFSET_RE.captures(raw.trim()).ok_or_else(invalid)?;

    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let hours: u32 = caps[2].parse().map_err(|_| invalid())?;
    let minutes: u32 = caps[3].parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    let offset = sign * (hours as f64 + minutes as f64 / 60.0);
    log::debug!("Parsed UTC offset: {}", offset);
    Ok(offset)
}

/// Parse a hemisphere-suffixed coordinate such as `10.7769N` or `106.7009E`.
pub fn parse_coordinate(raw: &str, axis: Axis) -> Result<f64, InputError> {
    let invalid = || InputError::InvalidCoordinate {
        axis,
        value: raw.to_string(),
    };
    let caps = COORDINATE_RE.captures(raw.trim()).ok_or_else(invalid)?;

    let magnitude: f64 = caps[1].parse().map_err(|_| invalid())?;
    let hemisphere = caps[2]
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(invalid)?;
    if !axis.accepts(hemisphere) {
        return Err(invalid());
    }

    let value = if matches!(hemisphere, 'S' | 'W') {
        -magnitude
    } else {
        magnitude
    };
    if value.abs() > axis.limit() {
        return Err(InputError::CoordinateOutOfRange { axis, value });
    }

    log::debug!("Parsed {}: {}", axis, value);
    Ok(value)
}

/// Parse a `YYYY/MM/DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| InputError::InvalidDate(raw.to_string()))
}

fn parse_local_datetime(date: &str, time: &str) -> Result<NaiveDateTime, InputError> {
    let joined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&joined, DATETIME_FORMAT)
        .map_err(|_| InputError::InvalidDateTime(joined))
}

/// Unvalidated birth parameters, as typed by a user or read from a registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthParams {
    pub instrument: String,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub birth_location: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub utc_offset: Option<String>,
}

impl BirthParams {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            ..Self::default()
        }
    }

    /// Fill every missing field from `fallback`; fields already set win.
    pub fn or(self, fallback: BirthParams) -> BirthParams {
        BirthParams {
            instrument: self.instrument,
            birth_date: self.birth_date.or(fallback.birth_date),
            birth_time: self.birth_time.or(fallback.birth_time),
            birth_location: self.birth_location.or(fallback.birth_location),
            lat: self.lat.or(fallback.lat),
            lon: self.lon.or(fallback.lon),
            utc_offset: self.utc_offset.or(fallback.utc_offset),
        }
    }

    pub fn validate(&self) -> Result<BirthData, InputError> {
        BirthData::parse(self)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, InputError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(InputError::MissingParameter(name))
}

/// Validated birth data of an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub instrument: String,
    pub location: String,
    /// Civil local date-time of the birth moment
    pub local: NaiveDateTime,
    /// Signed hours east of UTC
    pub utc_offset_hours: f64,
    pub geo: GeoLocation,
}

impl BirthData {
    pub fn parse(params: &BirthParams) -> Result<Self, InputError> {
        let birth_date = required(&params.birth_date, "birth_date")?;
        let birth_time = required(&params.birth_time, "birth_time")?;
        let location = required(&params.birth_location, "birth_location")?;
        let lat = required(&params.lat, "lat")?;
        let lon = required(&params.lon, "lon")?;
        let utc_offset = required(&params.utc_offset, "utc_offset")?;

        let utc_offset_hours = parse_utc_offset(utc_offset)?;
        let geo = GeoLocation {
            lat: parse_coordinate(lat, Axis::Latitude)?,
            lon: parse_coordinate(lon, Axis::Longitude)?,
        };
        let local = parse_local_datetime(birth_date, birth_time)?;

        Ok(Self {
            instrument: params.instrument.clone(),
            location: location.to_string(),
            local,
            utc_offset_hours,
            geo,
        })
    }

    /// Birth moment in UTC.
    pub fn utc(&self) -> NaiveDateTime {
        let offset_seconds = (self.utc_offset_hours * 3600.0).round() as i64;
        self.local - Duration::seconds(offset_seconds)
    }
}
