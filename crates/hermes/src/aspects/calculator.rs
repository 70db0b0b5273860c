use crate::aspects::types::{AspectDefinition, ASPECTS};
use crate::zodiac::normalize_degrees;

/// Shortest-arc distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// The best aspect found between two longitudes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectHit {
    pub definition: AspectDefinition,
    /// |separation - exact angle|
    pub orb_diff: f64,
    /// Tolerance the hit was admitted under
    pub allowed_orb: f64,
}

impl AspectHit {
    /// 1.0 at exact, falling to 0.0 at the edge of the allowed orb.
    pub fn exactness(&self) -> f64 {
        1.0 - self.orb_diff / self.allowed_orb
    }
}

/// Aspect calculator
#[derive(Debug, Clone, Copy)]
pub struct AspectCalculator {
    definitions: &'static [AspectDefinition],
}

impl AspectCalculator {
    /// Calculator over the canonical aspect list
    pub fn new() -> Self {
        Self {
            definitions: &ASPECTS,
        }
    }

    /// Calculator over a custom, ordered definition list.
    pub fn with_definitions(definitions: &'static [AspectDefinition]) -> Self {
        Self { definitions }
    }

    /// Find the tightest aspect between two longitudes.
    ///
    /// Every base orb is multiplied by `orb_scale`. Only a strictly smaller
    /// deviation replaces the current best, so an exact tie keeps the
    /// definition that comes first in the list.
    pub fn best_aspect(&self, lon1: f64, lon2: f64, orb_scale: f64) -> Option<AspectHit> {
        let separation = angular_separation(lon1, lon2);
        let mut best: Option<AspectHit> = None;

        for definition in self.definitions {
            let allowed_orb = definition.orb * orb_scale;
            let orb_diff = (separation - definition.angle).abs();
            if orb_diff > allowed_orb {
                continue;
            }
            let tighter = best.map_or(true, |current| orb_diff < current.orb_diff);
            if tighter {
                best = Some(AspectHit {
                    definition: *definition,
                    orb_diff,
                    allowed_orb,
                });
            }
        }

        best
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}
