//! End-to-end run: chart → scan → score → select → collapse → merge.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::{BirthData, NatalChart};
use crate::ephemeris::EphemerisProvider;
use crate::error::Result;
use crate::planets::{NatalPoint, Planet, DEFAULT_TRANSIT_PLANETS};
use crate::transit::{
    collapse_aspects, collapse_retrograde, merge_windows, score_matches, select_daily, Report,
    ScanRequest, Selection, TransitScanner,
};

pub const DEFAULT_ORB_DAYS: f64 = 2.0;
pub const DEFAULT_MIN_SCORE: f64 = 4.0;
pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub orb_days: f64,
    pub planets: Vec<Planet>,
    pub points: Option<Vec<NatalPoint>>,
    pub min_score: f64,
    pub top_n: usize,
    /// Largest tightest-orb a daily record may have; defaults to `orb_days`
    pub max_orb: Option<f64>,
    /// Body whose retrograde runs become windows
    pub retrograde_planet: Planet,
}

impl PipelineOptions {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            orb_days: DEFAULT_ORB_DAYS,
            planets: DEFAULT_TRANSIT_PLANETS.to_vec(),
            points: None,
            min_score: DEFAULT_MIN_SCORE,
            top_n: DEFAULT_TOP_N,
            max_orb: None,
            retrograde_planet: Planet::Mercury,
        }
    }

    pub fn scan_request(&self) -> ScanRequest {
        ScanRequest {
            start: self.start,
            end: self.end,
            orb_days: self.orb_days,
            planets: self.planets.clone(),
            points: self.points.clone(),
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            max_orb: self.max_orb.unwrap_or(self.orb_days),
            min_score: self.min_score,
            top_n: self.top_n,
        }
    }
}

/// Runs the whole pipeline against one provider.
///
/// The provider must be ready before it is handed over; the pipeline never
/// initialises ephemeris data itself.
pub struct TransitPipeline<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P: EphemerisProvider + ?Sized> TransitPipeline<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    pub fn build_chart(&self, birth: BirthData) -> Result<NatalChart> {
        NatalChart::build(birth, self.provider)
    }

    pub fn run(&self, birth: BirthData, options: &PipelineOptions) -> Result<Report> {
        options.scan_request().validate()?;
        let chart = self.build_chart(birth)?;
        self.run_with_chart(&chart, options)
    }

    pub fn run_with_chart(&self, chart: &NatalChart, options: &PipelineOptions) -> Result<Report> {
        let request = options.scan_request();
        request.validate()?;

        let mut scanner = TransitScanner::new(chart, self.provider);
        let matches = scanner.scan(&request)?;
        let significance = score_matches(&matches);
        let retro_days =
            scanner.find_retrograde_days(options.retrograde_planet, options.start, options.end)?;
        log::debug!(
            "{} positions fetched, {} retrograde days for {}",
            scanner.cached_positions(),
            retro_days.len(),
            options.retrograde_planet
        );

        let selected = select_daily(&significance, &options.selection());
        let retro_windows = collapse_retrograde(options.retrograde_planet, &retro_days);
        let aspect_windows = collapse_aspects(&selected);
        let windows = merge_windows(retro_windows, aspect_windows);

        Ok(Report::new(chart, significance, selected, windows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_defaults_max_orb_to_orb_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut options = PipelineOptions::new(start, start);
        options.orb_days = 3.0;
        assert_eq!(options.selection().max_orb, 3.0);
        options.max_orb = Some(1.5);
        assert_eq!(options.selection().max_orb, 1.5);
        assert_eq!(options.selection().top_n, DEFAULT_TOP_N);
    }
}
