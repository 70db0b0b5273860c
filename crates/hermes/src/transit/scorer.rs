//! Aggregates same-day, same-point matches into scored records.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::planets::{NatalPoint, Planet};
use crate::transit::types::{DailySignificance, RawMatch, Timeframe};

pub const SIGNIFICANCE_THRESHOLD: f64 = 3.0;
pub const RULING_PLANET_BONUS: f64 = 2.5;
pub const RETROGRADE_BONUS: f64 = 1.0;
/// Each additional match on the same day multiplies the score by this much more.
pub const COUNT_FACTOR: f64 = 0.7;
pub const POLARITY_OFFSET: f64 = 1.5;
/// Weight for Mercury and Venus transits that do not hit the ruler
pub const INNER_PLANET_WEIGHT: f64 = 0.5;

pub fn weight_factor(m: &RawMatch) -> f64 {
    match m.transit_planet {
        Planet::Mercury | Planet::Venus if !m.is_ruling_hit => INNER_PLANET_WEIGHT,
        planet => planet.weight(),
    }
}

/// Contribution of one match to the day's base score.
pub fn match_contribution(m: &RawMatch) -> f64 {
    let ruling_bonus = if m.is_ruling_hit {
        RULING_PLANET_BONUS
    } else {
        0.0
    };
    let retro_bonus = if m.is_mercury_retrograde() {
        RETROGRADE_BONUS
    } else {
        0.0
    };
    m.exactness * (m.polarity + POLARITY_OFFSET) * weight_factor(m) + ruling_bonus + retro_bonus
}

pub fn total_score(matches: &[&RawMatch]) -> f64 {
    let base: f64 = matches.iter().map(|m| match_contribution(m)).sum();
    base * (1.0 + matches.len() as f64 * COUNT_FACTOR)
}

/// Long-Term dominates; otherwise a shared label, or Mixed.
pub fn aggregate_timeframe(matches: &[&RawMatch]) -> Option<Timeframe> {
    let first = matches.first()?.timeframe;
    if matches.iter().any(|m| m.timeframe == Timeframe::LongTerm) {
        return Some(Timeframe::LongTerm);
    }
    if matches.iter().any(|m| m.timeframe != first) {
        return Some(Timeframe::Mixed);
    }
    Some(first)
}

fn summarize(matches: &[&RawMatch]) -> String {
    let mut by_orb: Vec<&RawMatch> = matches.to_vec();
    by_orb.sort_by(|a, b| a.orb_degree.total_cmp(&b.orb_degree));
    by_orb
        .iter()
        .map(|m| {
            format!(
                "{} {}{} (Orb {:.2}°)",
                m.transit_planet,
                m.aspect,
                if m.is_retrograde { " Rx" } else { "" },
                m.orb_degree
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Score one (date, point) group. `None` when the group is empty or its
/// score does not reach the significance threshold.
pub fn score_day(
    date: NaiveDate,
    natal_point: NatalPoint,
    matches: &[&RawMatch],
) -> Option<DailySignificance> {
    let timeframe = aggregate_timeframe(matches)?;
    let score = total_score(matches);
    if score.abs() < SIGNIFICANCE_THRESHOLD {
        return None;
    }

    // first match wins an orb tie
    let tightest = matches
        .iter()
        .copied()
        .reduce(|best, m| if m.orb_degree < best.orb_degree { m } else { best })?;

    Some(DailySignificance {
        date,
        natal_point,
        transit_count: matches.len(),
        is_ruling_hit: matches.iter().any(|m| m.is_ruling_hit),
        mercury_retrograde: matches.iter().any(|m| m.is_mercury_retrograde()),
        timeframe,
        score,
        orb_degree: tightest.orb_degree,
        transits: summarize(matches),
        interpretation: tightest.aspect.definition().interpretation.to_string(),
        transit_planet: tightest.transit_planet,
        aspect: tightest.aspect,
    })
}

/// Group matches by (date, natal point), score each group and keep the
/// significant ones, ordered by date ascending then score descending.
/// Equal scores on one date keep canonical natal point order, not input order.
pub fn score_matches(matches: &[RawMatch]) -> Vec<DailySignificance> {
    let mut groups: BTreeMap<(NaiveDate, NatalPoint), Vec<&RawMatch>> = BTreeMap::new();
    for m in matches {
        groups.entry((m.date, m.natal_point)).or_default().push(m);
    }

    let mut results: Vec<DailySignificance> = groups
        .iter()
        .filter_map(|((date, point), group)| score_day(*date, *point, group))
        .collect();
    results.sort_by(|a, b| a.date.cmp(&b.date).then(b.score.total_cmp(&a.score)));

    log::debug!("Filtered transit events: {}", results.len());
    results
}
