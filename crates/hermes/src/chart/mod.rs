pub mod birth;
pub mod natal;

pub use birth::{parse_coordinate, parse_date, parse_utc_offset, Axis, BirthData, BirthParams};
pub use natal::{resolve_ruler, NatalChart, PointDescription, ReferencePoint, RulerDivergence};
