use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Display name, e.g. "Trine (120°)"
    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction (0°)",
            AspectKind::Square => "Square (90°)",
            AspectKind::Trine => "Trine (120°)",
            AspectKind::Opposition => "Opposition (180°)",
        }
    }

    /// The canonical definition for this aspect.
    pub fn definition(self) -> &'static AspectDefinition {
        match self {
            AspectKind::Conjunction => &CONJUNCTION,
            AspectKind::Square => &SQUARE,
            AspectKind::Trine => &TRINE,
            AspectKind::Opposition => &OPPOSITION,
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one aspect
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact angle in degrees
    pub angle: f64,
    /// Base orb in degrees, before body and run scaling
    pub orb: f64,
    /// -1.0 (hard) ..= 1.0 (harmonious)
    pub polarity: f64,
    pub interpretation: &'static str,
}

pub const CONJUNCTION: AspectDefinition = AspectDefinition {
    kind: AspectKind::Conjunction,
    angle: 0.0,
    orb: 10.0,
    polarity: 0.8,
    interpretation: "New cycle, release of energy. Good.",
};

pub const SQUARE: AspectDefinition = AspectDefinition {
    kind: AspectKind::Square,
    angle: 90.0,
    orb: 6.0,
    polarity: -1.0,
    interpretation: "Tension, challenge, friction. Bad.",
};

pub const TRINE: AspectDefinition = AspectDefinition {
    kind: AspectKind::Trine,
    angle: 120.0,
    orb: 6.0,
    polarity: 1.0,
    interpretation: "Harmony, natural flow. Good. Great.",
};

pub const OPPOSITION: AspectDefinition = AspectDefinition {
    kind: AspectKind::Opposition,
    angle: 180.0,
    orb: 10.0,
    polarity: -1.0,
    interpretation: "Culmination, confrontation. Bad.",
};

/// Canonical aspect list. Order matters: on an exact orb tie the earlier
/// definition wins.
pub const ASPECTS: [AspectDefinition; 4] = [CONJUNCTION, SQUARE, TRINE, OPPOSITION];
