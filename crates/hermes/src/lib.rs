pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod pipeline;
pub mod planets;
pub mod transit;
pub mod zodiac;

pub use chart::{BirthData, BirthParams, NatalChart, ReferencePoint, RulerDivergence};
pub use error::{HermesError, InputError, Result};
pub use ephemeris::{EphemerisProvider, TableEphemeris};
pub use pipeline::{PipelineOptions, TransitPipeline};
pub use planets::{NatalPoint, Planet, TRACKED_PLANETS};
pub use transit::{
    AspectWindow, DailySignificance, RawMatch, Report, RetrogradeWindow, Timeframe, Window,
};

#[cfg(feature = "swiss")]
pub use ephemeris::SwissEphemerisAdapter;
