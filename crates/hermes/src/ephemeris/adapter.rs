use std::env;
use std::path::{Path, PathBuf};

use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use swisseph::AscMc;

use crate::ephemeris::data_path::{resolve_ephemeris_path, validate_ephemeris_dir, EPHEMERIS_PATH_ENV};
use crate::ephemeris::types::{
    Angles, BodyPosition, EphemerisError, EphemerisProvider, GeoLocation, JulianDay,
};
use crate::planets::Planet;
use crate::zodiac::normalize_degrees;

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const GREG_CAL: u32 = 1;
const PLACIDUS: u8 = b'P';

/// Swiss Ephemeris adapter implementation
///
/// Construct it once; `new` checks that the data directory is usable so the
/// pipeline never has to.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = resolve_ephemeris_path(ephemeris_path, env::var(EPHEMERIS_PATH_ENV).ok());
        validate_ephemeris_dir(&path)?;

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Using Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

/// Swiss Ephemeris body number
fn planet_code(planet: Planet) -> u32 {
    match planet {
        Planet::Sun => 0,
        Planet::Moon => 1,
        Planet::Mercury => 2,
        Planet::Venus => 3,
        Planet::Mars => 4,
        Planet::Jupiter => 5,
        Planet::Saturn => 6,
        Planet::Uranus => 7,
        Planet::Neptune => 8,
        Planet::Pluto => 9,
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn to_julian_day(&self, year: i32, month: u32, day: u32, hour_utc: f64) -> JulianDay {
        JulianDay(julday(year, month as i32, day as i32, hour_utc, GREG_CAL))
    }

    fn body_position(
        &self,
        jd: JulianDay,
        planet: Planet,
        want_speed: bool,
    ) -> Result<BodyPosition, EphemerisError> {
        let mut flags = FLG_SWIEPH;
        if want_speed {
            flags |= FLG_SPEED;
        }

        let result = calc_ut(jd.0, planet_code(planet), flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet,
                jd: jd.0,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let result_array = result.out;
        Ok(BodyPosition {
            lon: normalize_degrees(result_array[0]),
            speed_lon: if want_speed { Some(result_array[3]) } else { None },
        })
    }

    fn houses(&self, jd: JulianDay, location: GeoLocation) -> Result<Angles, EphemerisError> {
        let (_cusps, ascmc) = houses_ex(jd.0, FLG_SWIEPH, location.lat, location.lon, PLACIDUS as i32);
        let ascmc = AscMc::from_array(ascmc);

        let (asc, mc) = (ascmc.ascendant, ascmc.mc);
        if !asc.is_finite() || !mc.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite angles at lat {} lon {}", location.lat, location.lon),
            });
        }

        Ok(Angles {
            asc: normalize_degrees(asc),
            mc: normalize_degrees(mc),
        })
    }
}
