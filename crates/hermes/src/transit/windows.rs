//! Run-length collapsing of consecutive calendar days into windows.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::aspects::AspectKind;
use crate::planets::{NatalPoint, Planet};
use crate::transit::types::{AspectWindow, DailySignificance, RetrogradeWindow};

/// Split a date-sorted slice into maximal runs of consecutive days.
///
/// Any gap other than exactly one day (including a repeated date) ends a run.
fn consecutive_runs<T>(items: &[T], date_of: impl Fn(&T) -> NaiveDate) -> Vec<&[T]> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    for i in 1..items.len() {
        let gap = date_of(&items[i]) - date_of(&items[i - 1]);
        if gap.num_days() != 1 {
            runs.push(&items[run_start..i]);
            run_start = i;
        }
    }
    if run_start < items.len() {
        runs.push(&items[run_start..]);
    }
    runs
}

/// Collapse the days on which `planet` is retrograde into windows.
///
/// Input order and duplicates do not matter. The peak is the middle day of
/// each run, the later of the two middles for an even-length run.
pub fn collapse_retrograde(planet: Planet, days: &[NaiveDate]) -> Vec<RetrogradeWindow> {
    let mut dates = days.to_vec();
    dates.sort();
    dates.dedup();

    consecutive_runs(&dates, |d| *d)
        .into_iter()
        .map(|run| RetrogradeWindow {
            planet,
            start: run[0],
            end: run[run.len() - 1],
            peak: run[run.len() / 2],
        })
        .collect()
}

pub fn window_label(planet: Planet, point: NatalPoint, aspect: AspectKind) -> String {
    format!("{} → {} {}", planet, point, aspect)
}

fn emit_aspect_window(run: &[&DailySignificance]) -> Option<AspectWindow> {
    let first = *run.first()?;
    let last = *run.last()?;
    // first record wins an orb tie
    let peak = run
        .iter()
        .copied()
        .reduce(|best, r| if r.orb_degree < best.orb_degree { r } else { best })?;

    Some(AspectWindow {
        transit_planet: peak.transit_planet,
        natal_point: peak.natal_point,
        aspect: peak.aspect,
        label: window_label(peak.transit_planet, peak.natal_point, peak.aspect),
        start: first.date,
        end: last.date,
        peak: peak.date,
        peak_orb: peak.orb_degree,
        score: peak.score,
        interpretation: peak.interpretation.clone(),
    })
}

/// Collapse daily records sharing (transit planet, natal point, aspect) into
/// windows of consecutive days. Buckets come out in key order, windows within
/// a bucket in date order.
pub fn collapse_aspects(records: &[DailySignificance]) -> Vec<AspectWindow> {
    let mut buckets: BTreeMap<(Planet, NatalPoint, AspectKind), Vec<&DailySignificance>> =
        BTreeMap::new();
    for record in records {
        buckets
            .entry((record.transit_planet, record.natal_point, record.aspect))
            .or_default()
            .push(record);
    }

    let mut windows = Vec::new();
    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|r| r.date);
        for run in consecutive_runs(bucket.as_slice(), |r| r.date) {
            windows.extend(emit_aspect_window(run));
        }
    }
    windows
}
