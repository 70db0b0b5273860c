#[cfg(feature = "swiss")]
pub mod adapter;
pub mod data_path;
pub mod table;
pub mod types;

#[cfg(feature = "swiss")]
pub use adapter::SwissEphemerisAdapter;
pub use table::TableEphemeris;
pub use types::{
    gregorian_julian_day, julian_day_for, Angles, BodyPosition, EphemerisError,
    EphemerisProvider, GeoLocation, JulianDay,
};
