mod common;

use common::date;
use hermes::aspects::AspectKind;
use hermes::transit::scorer::{score_matches, total_score};
use hermes::{NatalPoint, Planet, RawMatch, Timeframe};

fn exact_trine(planet: Planet) -> RawMatch {
    RawMatch {
        date: date(2025, 3, 1),
        transit_planet: planet,
        natal_point: NatalPoint::Venus,
        aspect: AspectKind::Trine,
        orb_degree: 0.0,
        exactness: 1.0,
        polarity: 1.0,
        is_ruling_hit: false,
        is_retrograde: false,
        timeframe: Timeframe::for_planet(planet),
    }
}

#[test]
fn test_exact_jupiter_trine_is_significant() {
    let records = score_matches(&[exact_trine(Planet::Jupiter)]);
    assert_eq!(records.len(), 1);
    // 1.0 * (1.0 + 1.5) * 1.0 * (1 + 0.7)
    assert!((records[0].score - 4.25).abs() < 1e-9);
    assert_eq!(records[0].transit_count, 1);
    assert_eq!(records[0].timeframe, Timeframe::Specific(Planet::Jupiter));
    assert_eq!(records[0].transit_planet, Planet::Jupiter);
}

#[test]
fn test_low_weight_trines_fall_below_cutoff() {
    // Moon weight 0.4: 1.7
    assert!(score_matches(&[exact_trine(Planet::Moon)]).is_empty());
    // Mercury off the ruler: 2.125
    assert!(score_matches(&[exact_trine(Planet::Mercury)]).is_empty());
    // Neptune weight 0.8: 3.4, still in
    assert_eq!(score_matches(&[exact_trine(Planet::Neptune)]).len(), 1);
}

#[test]
fn test_ruling_hit_restores_inner_planet_weight() {
    let mut m = exact_trine(Planet::Mercury);
    m.is_ruling_hit = true;
    // (2.5 * 0.5 + 2.5) * 1.7
    let score = total_score(&[&m]);
    assert!((score - 6.375).abs() < 1e-9);
}

#[test]
fn test_mercury_retrograde_bonus() {
    let mut m = exact_trine(Planet::Mercury);
    m.is_retrograde = true;
    let records = score_matches(&[m]);
    assert_eq!(records.len(), 1);
    assert!(records[0].mercury_retrograde);
    // (2.5 * 0.5 + 1.0) * 1.7
    assert!((records[0].score - 3.825).abs() < 1e-9);
    assert!(records[0].transits.contains("Rx"));
}

#[test]
fn test_group_counts_and_timeframe() {
    let mut sun = exact_trine(Planet::Sun);
    sun.orb_degree = 1.5;
    let mut moon = exact_trine(Planet::Moon);
    moon.orb_degree = 0.5;
    moon.aspect = AspectKind::Conjunction;

    let records = score_matches(&[sun, moon]);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.transit_count, 2);
    assert_eq!(record.timeframe, Timeframe::LongTerm);
    assert_eq!(record.orb_degree, 0.5);
    assert_eq!(record.transit_planet, Planet::Moon);
    assert_eq!(record.aspect, AspectKind::Conjunction);
    assert!(record.transits.starts_with("Moon"));
    // (2.5 * 2.0 + 2.5 * 0.4) * (1 + 2 * 0.7)
    assert!((record.score - 14.4).abs() < 1e-9);
}

#[test]
fn test_exact_sun_hard_aspects_stay_below_cutoff() {
    let mut square = exact_trine(Planet::Sun);
    square.aspect = AspectKind::Square;
    square.polarity = -1.0;
    let mut opposition = square.clone();
    opposition.aspect = AspectKind::Opposition;
    opposition.natal_point = NatalPoint::Mars;

    // (-1 + 1.5) * 2.0 * 1.7 = 1.7 on each point
    let records = score_matches(&[square, opposition]);
    assert_eq!(records.len(), 0);
}

#[test]
fn test_records_ordered_by_date_then_score() {
    let mut late = exact_trine(Planet::Jupiter);
    late.date = date(2025, 3, 2);
    let weak = exact_trine(Planet::Neptune);
    let mut strong = exact_trine(Planet::Sun);
    strong.natal_point = NatalPoint::Moon;

    let records = score_matches(&[late, weak, strong]);
    let order: Vec<_> = records.iter().map(|r| (r.date, r.natal_point)).collect();
    assert_eq!(
        order,
        vec![
            (date(2025, 3, 1), NatalPoint::Moon),
            (date(2025, 3, 1), NatalPoint::Venus),
            (date(2025, 3, 2), NatalPoint::Venus),
        ]
    );
}

#[test]
fn test_equal_scores_follow_point_order() {
    let mut on_jupiter = exact_trine(Planet::Jupiter);
    on_jupiter.natal_point = NatalPoint::Jupiter;
    let mut on_sun = exact_trine(Planet::Jupiter);
    on_sun.natal_point = NatalPoint::Sun;

    let records = score_matches(&[on_jupiter, on_sun]);
    let points: Vec<_> = records.iter().map(|r| r.natal_point).collect();
    assert_eq!(points, vec![NatalPoint::Sun, NatalPoint::Jupiter]);
    assert_eq!(records[0].score, records[1].score);
}
