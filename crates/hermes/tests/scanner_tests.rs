mod common;

use common::{chart_with, date};
use hermes::aspects::{AspectCalculator, AspectDefinition, AspectKind, SQUARE, TRINE};
use hermes::ephemeris::EphemerisError;
use hermes::transit::{ScanRequest, TransitScanner};
use hermes::{HermesError, InputError, NatalPoint, Planet, TableEphemeris};

static TRINE_BEFORE_SQUARE: [AspectDefinition; 2] = [TRINE, SQUARE];

fn request(planets: Vec<Planet>, points: Vec<NatalPoint>, orb_days: f64) -> ScanRequest {
    ScanRequest {
        start: date(2025, 1, 1),
        end: date(2025, 1, 1),
        orb_days,
        planets,
        points: Some(points),
    }
}

#[test]
fn test_single_conjunction_exactness() {
    let chart = chart_with(&[(Planet::Jupiter, 100.0)]);
    let provider = TableEphemeris::new().with_position(Planet::Sun, date(2025, 1, 1), 103.0, 1.0);
    let mut scanner = TransitScanner::new(&chart, &provider);

    let matches = scanner
        .scan(&request(vec![Planet::Sun], vec![NatalPoint::Jupiter], 1.0))
        .unwrap();

    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.aspect, AspectKind::Conjunction);
    assert!((m.orb_degree - 3.0).abs() < 1e-9);
    // allowed orb = 10 * 2.2 * 1
    assert!((m.exactness - (1.0 - 3.0 / 22.0)).abs() < 1e-12);
    assert!(!m.is_ruling_hit);
    assert!(!m.is_retrograde);
}

#[test]
fn test_equal_orb_tie_goes_to_first_definition() {
    let chart = chart_with(&[(Planet::Jupiter, 10.0)]);
    let provider = TableEphemeris::new().with_position(Planet::Sun, date(2025, 1, 1), 115.0, 1.0);
    let req = request(vec![Planet::Sun], vec![NatalPoint::Jupiter], 2.0);

    let matches = TransitScanner::new(&chart, &provider).scan(&req).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].aspect, AspectKind::Square);

    let matches = TransitScanner::new(&chart, &provider)
        .with_calculator(AspectCalculator::with_definitions(&TRINE_BEFORE_SQUARE))
        .scan(&req)
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].aspect, AspectKind::Trine);
}

#[test]
fn test_moon_gate_drops_loose_matches() {
    let chart = chart_with(&[(Planet::Sun, 50.0), (Planet::Mercury, 200.0)]);
    let provider = TableEphemeris::new()
        .with_position(Planet::Moon, date(2025, 1, 1), 50.1, 13.0)
        .with_position(Planet::Moon, date(2025, 1, 2), 52.0, 13.0);
    let req = ScanRequest {
        start: date(2025, 1, 1),
        end: date(2025, 1, 2),
        orb_days: 1.0,
        planets: vec![Planet::Moon],
        points: Some(vec![NatalPoint::Sun]),
    };

    let matches = TransitScanner::new(&chart, &provider).scan(&req).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].date, date(2025, 1, 1));
    assert!(matches[0].exactness > 0.97);
}

#[test]
fn test_moon_gate_keeps_ruling_hits() {
    // Virgo ascendant: Mercury rules the chart
    let chart = chart_with(&[(Planet::Mercury, 50.0)]);
    let provider = TableEphemeris::new().with_position(Planet::Moon, date(2025, 1, 1), 55.0, 13.0);

    let matches = TransitScanner::new(&chart, &provider)
        .scan(&request(vec![Planet::Moon], vec![NatalPoint::Mercury], 1.0))
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_ruling_hit);
    assert!(matches[0].exactness < 0.97);
}

#[test]
fn test_matches_ordered_by_date_planet_point() {
    let chart = chart_with(&[(Planet::Sun, 100.0), (Planet::Jupiter, 101.0)]);
    let provider = TableEphemeris::new()
        .with_motion(Planet::Mars, date(2025, 1, 1), 100.0, 0.5)
        .with_motion(Planet::Sun, date(2025, 1, 1), 100.0, 1.0);
    let req = ScanRequest {
        start: date(2025, 1, 1),
        end: date(2025, 1, 2),
        orb_days: 1.0,
        planets: vec![Planet::Mars, Planet::Sun],
        points: Some(vec![NatalPoint::Jupiter, NatalPoint::Sun]),
    };

    let matches = TransitScanner::new(&chart, &provider).scan(&req).unwrap();
    let keys: Vec<_> = matches
        .iter()
        .map(|m| (m.date, m.transit_planet, m.natal_point))
        .collect();
    assert_eq!(
        keys,
        vec![
            (date(2025, 1, 1), Planet::Mars, NatalPoint::Sun),
            (date(2025, 1, 1), Planet::Mars, NatalPoint::Jupiter),
            (date(2025, 1, 1), Planet::Sun, NatalPoint::Sun),
            (date(2025, 1, 1), Planet::Sun, NatalPoint::Jupiter),
            (date(2025, 1, 2), Planet::Mars, NatalPoint::Sun),
            (date(2025, 1, 2), Planet::Mars, NatalPoint::Jupiter),
            (date(2025, 1, 2), Planet::Sun, NatalPoint::Sun),
            (date(2025, 1, 2), Planet::Sun, NatalPoint::Jupiter),
        ]
    );
}

#[test]
fn test_positions_fetched_once_per_planet_and_day() {
    let chart = chart_with(&[(Planet::Sun, 0.0)]);
    let provider = TableEphemeris::new()
        .with_motion(Planet::Mercury, date(2025, 1, 1), 300.0, -0.4);
    let req = ScanRequest {
        start: date(2025, 1, 1),
        end: date(2025, 1, 3),
        orb_days: 1.0,
        planets: vec![Planet::Mercury],
        points: None,
    };

    let mut scanner = TransitScanner::new(&chart, &provider);
    scanner.scan(&req).unwrap();
    assert_eq!(scanner.cached_positions(), 3);

    let days = scanner
        .find_retrograde_days(Planet::Mercury, req.start, req.end)
        .unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(scanner.cached_positions(), 3);
}

#[test]
fn test_inverted_range_fails_before_provider_call() {
    let chart = chart_with(&[(Planet::Sun, 0.0)]);
    let provider = TableEphemeris::new();
    let req = ScanRequest {
        start: date(2025, 2, 1),
        end: date(2025, 1, 1),
        orb_days: 1.0,
        planets: vec![Planet::Sun],
        points: None,
    };

    let mut scanner = TransitScanner::new(&chart, &provider);
    let err = scanner.scan(&req).unwrap_err();
    assert!(matches!(err, HermesError::Input(InputError::InvalidRange { .. })));
    assert_eq!(scanner.cached_positions(), 0);
}

#[test]
fn test_non_positive_orb_rejected() {
    let chart = chart_with(&[(Planet::Sun, 0.0)]);
    let provider = TableEphemeris::new();
    let err = TransitScanner::new(&chart, &provider)
        .scan(&request(vec![Planet::Sun], vec![NatalPoint::Sun], 0.0))
        .unwrap_err();
    assert!(matches!(err, HermesError::Input(InputError::NonPositiveOrb(_))));
}

#[test]
fn test_provider_failure_propagates() {
    let chart = chart_with(&[(Planet::Sun, 0.0)]);
    let provider = TableEphemeris::new();
    let err = TransitScanner::new(&chart, &provider)
        .scan(&request(vec![Planet::Mars], vec![NatalPoint::Sun], 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        HermesError::Ephemeris(EphemerisError::CalculationFailed {
            planet: Planet::Mars,
            ..
        })
    ));
}
