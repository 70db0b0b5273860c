//! Presentation thresholds and the merged, chronological window list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::{NatalChart, ReferencePoint, RulerDivergence};
use crate::planets::Planet;
use crate::transit::types::{AspectWindow, DailySignificance, RetrogradeWindow, Window};

/// Thresholds applied to daily records before they are collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Records whose tightest orb exceeds this are dropped
    pub max_orb: f64,
    /// Records with |score| below this are dropped
    pub min_score: f64,
    /// Records kept per date, highest score first
    pub top_n: usize,
}

pub fn select_daily(records: &[DailySignificance], selection: &Selection) -> Vec<DailySignificance> {
    let mut kept: Vec<&DailySignificance> = records
        .iter()
        .filter(|r| r.orb_degree <= selection.max_orb && r.score.abs() >= selection.min_score)
        .collect();
    kept.sort_by(|a, b| a.date.cmp(&b.date).then(b.score.total_cmp(&a.score)));

    let mut selected = Vec::with_capacity(kept.len());
    let mut current: Option<NaiveDate> = None;
    let mut taken = 0;
    for record in kept {
        if current != Some(record.date) {
            current = Some(record.date);
            taken = 0;
        }
        if taken < selection.top_n {
            selected.push(record.clone());
            taken += 1;
        }
    }
    selected
}

/// Interleave both window kinds by start date.
///
/// Retrograde windows go in first and the sort is stable, so on a shared
/// start date a retrograde window precedes aspect windows.
pub fn merge_windows(retrograde: Vec<RetrogradeWindow>, aspects: Vec<AspectWindow>) -> Vec<Window> {
    let mut windows: Vec<Window> = retrograde
        .into_iter()
        .map(Window::Retrograde)
        .chain(aspects.into_iter().map(Window::Aspect))
        .collect();
    windows.sort_by_key(|w| w.start());
    windows
}

/// Complete output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub instrument: String,
    pub ruling_planet: Planet,
    pub ruler_divergence: Option<RulerDivergence>,
    pub chart: Vec<ReferencePoint>,
    /// Every significant (date, point) record, before presentation thresholds
    pub significance: Vec<DailySignificance>,
    /// Records that passed the thresholds and fed the aspect windows
    pub selected: Vec<DailySignificance>,
    pub windows: Vec<Window>,
}

impl Report {
    pub fn new(
        chart: &NatalChart,
        significance: Vec<DailySignificance>,
        selected: Vec<DailySignificance>,
        windows: Vec<Window>,
    ) -> Self {
        Self {
            instrument: chart.birth().instrument.clone(),
            ruling_planet: chart.ruling_planet(),
            ruler_divergence: chart.divergence(),
            chart: chart.points().to_vec(),
            significance,
            selected,
            windows,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
