pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, AspectCalculator, AspectHit};
pub use types::{AspectDefinition, AspectKind, ASPECTS, CONJUNCTION, OPPOSITION, SQUARE, TRINE};
