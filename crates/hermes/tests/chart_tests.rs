mod common;

use common::{natal_table, vnindex_birth, vnindex_params};
use hermes::chart::{NatalChart, RulerDivergence};
use hermes::{HermesError, InputError, NatalPoint, Planet, TableEphemeris};

#[test]
fn test_build_chart_from_provider() {
    let provider = natal_table(160.0, 70.0);
    let chart = NatalChart::build(vnindex_birth(), &provider).unwrap();

    assert_eq!(chart.points().len(), 9);
    assert_eq!(chart.point(NatalPoint::Sun).unwrap().longitude, 125.0);
    assert_eq!(chart.point(NatalPoint::Ascendant).unwrap().longitude, 160.0);
    assert_eq!(chart.point(NatalPoint::Midheaven).unwrap().longitude, 70.0);
    assert_eq!(chart.points()[7].point, NatalPoint::Ascendant);
}

#[test]
fn test_virgo_and_gemini_agree_on_mercury() {
    let provider = natal_table(160.0, 70.0);
    let chart = NatalChart::build(vnindex_birth(), &provider).unwrap();
    assert_eq!(chart.ruling_planet(), Planet::Mercury);
    assert_eq!(chart.divergence(), None);
}

#[test]
fn test_virgo_and_leo_diverge_ascendant_wins() {
    let provider = natal_table(160.0, 130.0);
    let chart = NatalChart::build(vnindex_birth(), &provider).unwrap();
    assert_eq!(chart.ruling_planet(), Planet::Mercury);
    assert_eq!(
        chart.divergence(),
        Some(RulerDivergence {
            ascendant: Planet::Mercury,
            midheaven: Planet::Sun,
        })
    );
}

#[test]
fn test_ruler_outside_chart_points() {
    // Scorpio ascendant is ruled by Pluto, which is never a natal point
    let provider = natal_table(215.0, 130.0);
    let chart = NatalChart::build(vnindex_birth(), &provider).unwrap();
    assert_eq!(chart.ruling_planet(), Planet::Pluto);
    assert!(chart.points().iter().all(|p| !p.point.is_ruled_by(Planet::Pluto)));
}

#[test]
fn test_missing_natal_position_propagates() {
    let provider = TableEphemeris::new().with_angles(160.0, 70.0);
    let result = NatalChart::build(vnindex_birth(), &provider);
    assert!(matches!(result, Err(HermesError::Ephemeris(_))));
}

#[test]
fn test_invalid_params_rejected_before_build() {
    let mut params = vnindex_params();
    params.utc_offset = Some("UTC+7".to_string());
    assert!(matches!(params.validate(), Err(InputError::InvalidUtcOffset(_))));

    let mut params = vnindex_params();
    params.lon = Some("200E".to_string());
    assert!(matches!(params.validate(), Err(InputError::CoordinateOutOfRange { .. })));

    let mut params = vnindex_params();
    params.birth_time = Some("9am".to_string());
    assert!(matches!(params.validate(), Err(InputError::InvalidDateTime(_))));
}
