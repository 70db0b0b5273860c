pub mod report;
pub mod scanner;
pub mod scorer;
pub mod types;
pub mod windows;

pub use report::{merge_windows, select_daily, Report, Selection};
pub use scanner::{DailyPosition, ScanRequest, TransitScanner};
pub use scorer::score_matches;
pub use types::{
    AspectWindow, DailySignificance, RawMatch, RetrogradeWindow, Timeframe, Window,
};
pub use windows::{collapse_aspects, collapse_retrograde};
