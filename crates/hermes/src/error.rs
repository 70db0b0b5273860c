//! Error types shared by the whole pipeline.
//!
//! Validation failures are raised before any ephemeris call is made.
//! Ephemeris failures are propagated unchanged.

use chrono::NaiveDate;
use thiserror::Error;

use crate::chart::Axis;
pub use crate::ephemeris::EphemerisError;

/// Input validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid UTC offset: '{0}'. Use '+HH:MM' or '-HH:MM'.")]
    InvalidUtcOffset(String),
    #[error("Invalid {axis}: '{value}'. Use e.g. '10.7769N'.")]
    InvalidCoordinate { axis: Axis, value: String },
    #[error("{axis} out of range: {value}")]
    CoordinateOutOfRange { axis: Axis, value: f64 },
    #[error("Invalid birth date/time: '{0}'. Use 'YYYY/MM/DD HH:MM'.")]
    InvalidDateTime(String),
    #[error("Invalid date: '{0}'. Dates must be 'YYYY/MM/DD'.")]
    InvalidDate(String),
    #[error("Start date {start} must be on or before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("orb_days must be positive, got {0}")]
    NonPositiveOrb(f64),
    #[error("Missing required parameter: {0}. Provide it via arguments or config file.")]
    MissingParameter(&'static str),
    #[error("Unknown planet: '{0}'")]
    UnknownPlanet(String),
    #[error("Unknown natal point: '{0}'")]
    UnknownPoint(String),
}

#[derive(Error, Debug)]
pub enum HermesError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

pub type Result<T> = std::result::Result<T, HermesError>;
