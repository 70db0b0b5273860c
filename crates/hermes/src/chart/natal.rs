//! The natal (reference) chart of an instrument.

use serde::{Deserialize, Serialize};

use crate::chart::birth::BirthData;
use crate::ephemeris::{julian_day_for, Angles, EphemerisProvider, JulianDay};
use crate::error::Result;
use crate::planets::{NatalPoint, Planet, TRACKED_PLANETS};
use crate::zodiac::{normalize_degrees, Sign};

/// A fixed point of the natal chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub point: NatalPoint,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
}

impl ReferencePoint {
    pub fn sign(&self) -> Sign {
        Sign::from_longitude(self.longitude)
    }
}

/// Ascendant and midheaven signs point at different rulers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerDivergence {
    pub ascendant: Planet,
    pub midheaven: Planet,
}

/// One row of the natal chart summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDescription {
    pub point: NatalPoint,
    pub sign: Sign,
    /// Whole degrees of absolute longitude (0-359)
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

/// Resolve the chart ruler from the two angles.
///
/// The ascendant's ruler always wins; a disagreement with the midheaven's
/// ruler is logged and reported, never an error.
pub fn resolve_ruler(asc: f64, mc: f64) -> (Planet, Option<RulerDivergence>) {
    let asc_sign = Sign::from_longitude(asc);
    let mc_sign = Sign::from_longitude(mc);
    let asc_ruler = asc_sign.ruler();
    let mc_ruler = mc_sign.ruler();
    log::debug!("Ascendant sign: {} → {}", asc_sign, asc_ruler);
    log::debug!("Midheaven sign: {} → {}", mc_sign, mc_ruler);

    if asc_ruler == mc_ruler {
        return (asc_ruler, None);
    }

    log::warn!(
        "Ascendant ruler ({}) differs from Midheaven ruler ({}). Using {}.",
        asc_ruler,
        mc_ruler,
        asc_ruler
    );
    (
        asc_ruler,
        Some(RulerDivergence {
            ascendant: asc_ruler,
            midheaven: mc_ruler,
        }),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatalChart {
    birth: BirthData,
    julian_day: JulianDay,
    points: Vec<ReferencePoint>,
    ruling_planet: Planet,
    divergence: Option<RulerDivergence>,
}

impl NatalChart {
    /// Compute the chart from validated birth data.
    pub fn build<P: EphemerisProvider + ?Sized>(birth: BirthData, provider: &P) -> Result<Self> {
        let jd = julian_day_for(provider, birth.utc());

        let mut planets = Vec::with_capacity(TRACKED_PLANETS.len());
        for planet in TRACKED_PLANETS {
            let position = provider.body_position(jd, planet, false)?;
            planets.push((planet, position.lon));
        }
        let angles = provider.houses(jd, birth.geo)?;

        Ok(Self::from_positions(birth, jd, &planets, angles))
    }

    /// Assemble a chart from already known positions.
    ///
    /// Planets that are not tracked are ignored; the points keep canonical order.
    pub fn from_positions(
        birth: BirthData,
        julian_day: JulianDay,
        planets: &[(Planet, f64)],
        angles: Angles,
    ) -> Self {
        let mut points: Vec<ReferencePoint> = NatalPoint::ALL
            .iter()
            .filter_map(|point| {
                let planet = point.planet()?;
                planets
                    .iter()
                    .find(|(p, _)| *p == planet)
                    .map(|(_, lon)| ReferencePoint {
                        point: *point,
                        longitude: normalize_degrees(*lon),
                    })
            })
            .collect();
        points.push(ReferencePoint {
            point: NatalPoint::Ascendant,
            longitude: normalize_degrees(angles.asc),
        });
        points.push(ReferencePoint {
            point: NatalPoint::Midheaven,
            longitude: normalize_degrees(angles.mc),
        });

        let (ruling_planet, divergence) = resolve_ruler(angles.asc, angles.mc);

        Self {
            birth,
            julian_day,
            points,
            ruling_planet,
            divergence,
        }
    }

    pub fn birth(&self) -> &BirthData {
        &self.birth
    }

    pub fn julian_day(&self) -> JulianDay {
        self.julian_day
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn point(&self, point: NatalPoint) -> Option<&ReferencePoint> {
        self.points.iter().find(|p| p.point == point)
    }

    pub fn ruling_planet(&self) -> Planet {
        self.ruling_planet
    }

    pub fn divergence(&self) -> Option<RulerDivergence> {
        self.divergence
    }

    /// Points to evaluate: all of them, or the filtered subset in chart order.
    pub fn select_points(&self, filter: Option<&[NatalPoint]>) -> Vec<ReferencePoint> {
        match filter {
            None => self.points.clone(),
            Some(wanted) => self
                .points
                .iter()
                .filter(|p| wanted.contains(&p.point))
                .copied()
                .collect(),
        }
    }

    pub fn describe(&self) -> Vec<PointDescription> {
        self.points
            .iter()
            .map(|p| {
                let degrees = p.longitude.floor();
                let minutes_f = (p.longitude - degrees) * 60.0;
                let minutes = minutes_f.floor();
                let seconds = ((minutes_f - minutes) * 60.0).floor();
                PointDescription {
                    point: p.point,
                    sign: p.sign(),
                    degrees: degrees as u32,
                    minutes: minutes as u32,
                    seconds: seconds as u32,
                }
            })
            .collect()
    }
}
