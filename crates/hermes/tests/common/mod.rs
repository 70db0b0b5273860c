#![allow(dead_code)]

use chrono::NaiveDate;
use hermes::chart::{BirthData, BirthParams, NatalChart};
use hermes::ephemeris::{Angles, JulianDay};
use hermes::{Planet, TableEphemeris};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn vnindex_params() -> BirthParams {
    BirthParams {
        instrument: "VNINDEX".to_string(),
        birth_date: Some("2000/07/28".to_string()),
        birth_time: Some("09:00".to_string()),
        birth_location: Some("Ho Chi Minh City".to_string()),
        lat: Some("10.7769N".to_string()),
        lon: Some("106.7009E".to_string()),
        utc_offset: Some("+07:00".to_string()),
    }
}

pub fn vnindex_birth() -> BirthData {
    vnindex_params().validate().unwrap()
}

/// Natal longitudes used by the canned tables
pub const NATAL_POSITIONS: [(Planet, f64); 7] = [
    (Planet::Sun, 125.0),
    (Planet::Moon, 20.0),
    (Planet::Mercury, 140.0),
    (Planet::Venus, 150.0),
    (Planet::Mars, 100.0),
    (Planet::Jupiter, 60.0),
    (Planet::Neptune, 305.0),
];

/// Table with the natal positions on the birth date (UTC) and the given angles.
pub fn natal_table(asc: f64, mc: f64) -> TableEphemeris {
    let birth_date = date(2000, 7, 28);
    NATAL_POSITIONS
        .iter()
        .fold(TableEphemeris::new().with_angles(asc, mc), |table, (planet, lon)| {
            table.with_position(*planet, birth_date, *lon, 1.0)
        })
}

/// A chart with only the given planets plus a Virgo ascendant and Gemini
/// midheaven, so Mercury rules.
pub fn chart_with(planets: &[(Planet, f64)]) -> NatalChart {
    NatalChart::from_positions(
        vnindex_birth(),
        JulianDay(2_451_753.583_333),
        planets,
        Angles { asc: 160.0, mc: 70.0 },
    )
}
