use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use urania::aspects::{
    build_aspects, find_aspect, AspectCalculator, AspectKind, AspectSettings, MatchPolicy, Orb,
    OrbPolicy, Pairing, Timing,
};
use urania::ephemeris::{BodyPosition, ChartLayer, Position};
use urania::houses::HouseCusps;
use urania::motion::is_applying;
use urania::EngineError;

fn body(id: &str, longitude: f64, speed: f64) -> BodyPosition {
    BodyPosition::body(id, Position { longitude, speed })
}

fn wide_orbs() -> AspectSettings {
    AspectSettings {
        orbs: OrbPolicy::uniform(Orb::new(8.0, 4.0)),
        ..AspectSettings::default()
    }
}

#[test]
fn test_exact_square() {
    let orbs = OrbPolicy::uniform(Orb::new(8.0, 4.0));
    let hit = find_aspect(10.0, 100.0, "sun", &orbs, MatchPolicy::FirstMatch)
        .unwrap()
        .unwrap();
    assert_eq!(hit.kind, AspectKind::Square);
    assert_eq!(hit.exact_angle, 90.0);
    assert!(hit.orb.abs() < 1e-9);
}

#[test]
fn test_orb_never_exceeds_owner_tolerance() {
    let settings = AspectSettings::default();
    for i in 0..720 {
        let lon_b = i as f64 * 0.5;
        for owner in ["sun", "saturn", "pluto", "vesta"] {
            if let Some(hit) =
                find_aspect(0.0, lon_b, owner, &settings.orbs, settings.match_policy).unwrap()
            {
                assert!(hit.orb <= settings.orbs.orb_for(owner, hit.kind) + 1e-12);
                assert!((hit.angle - hit.exact_angle).abs() - hit.orb < 1e-12);
            }
        }
    }
}

#[test]
fn test_no_aspect_outside_orb() {
    let orbs = OrbPolicy::default();
    assert!(find_aspect(0.0, 45.0, "sun", &orbs, MatchPolicy::Closest)
        .unwrap()
        .is_none());
}

#[test]
fn test_moving_away_from_exact_is_separating() {
    let moving = Position { longitude: 15.0, speed: 1.0 };
    let fixed = Position { longitude: 105.0, speed: 0.0 };
    assert!(!is_applying(&moving, &fixed, 90.0, 1.0).unwrap());
}

#[test]
fn test_applying_and_retrograde() {
    let fixed = Position { longitude: 100.0, speed: 0.0 };
    // 85° ahead and opening toward the square
    assert!(is_applying(&Position { longitude: 185.0, speed: 1.0 }, &fixed, 90.0, 1.0).unwrap());
    // same spot, retrograde: closing back toward the conjunction
    assert!(!is_applying(&Position { longitude: 185.0, speed: -1.0 }, &fixed, 90.0, 1.0).unwrap());
}

#[test]
fn test_within_chart_sorted_by_orb() {
    let settings = wide_orbs();
    let bodies = vec![
        body("sun", 0.0, 1.0),
        body("moon", 93.0, 13.0),
        body("mars", 181.0, 0.5),
    ];
    let (matches, summary) = build_aspects(
        &bodies,
        &bodies,
        Pairing::WithinChart,
        Timing::Static,
        &settings,
    )
    .unwrap();

    let orbs: Vec<f64> = matches.iter().map(|m| m.orb).collect();
    assert!(orbs.windows(2).all(|w| w[0] <= w[1]), "{orbs:?}");
    // sun-mars opposition (1), moon-mars square (2), sun-moon square (3)
    let kinds: Vec<_> = matches.iter().map(|m| (m.body_a.as_str(), m.body_b.as_str(), m.aspect)).collect();
    assert_eq!(
        kinds,
        vec![
            ("sun", "mars", AspectKind::Opposition),
            ("moon", "mars", AspectKind::Square),
            ("sun", "moon", AspectKind::Square),
        ]
    );
    assert_eq!(summary.total, 3);
    assert_eq!(summary.applying + summary.separating, 3);
    assert_eq!(summary.by_aspect[&AspectKind::Square], 2);
    assert_eq!(summary.by_body["mars"], 2);
}

#[test]
fn test_equal_orbs_keep_visit_order() {
    let settings = wide_orbs();
    let bodies = vec![
        body("sun", 0.0, 1.0),
        body("venus", 92.0, 1.0),
        body("mars", 268.0, 1.0),
    ];
    let (matches, _) = build_aspects(
        &bodies,
        &bodies,
        Pairing::WithinChart,
        Timing::Static,
        &settings,
    )
    .unwrap();
    // sun-venus and sun-mars are both 2° squares; visit order decides
    assert_eq!(matches[0].body_b, "venus");
    assert_eq!(matches[1].body_b, "mars");
}

#[test]
fn test_within_chart_visits_each_pair_once() {
    let settings = wide_orbs();
    let bodies = vec![body("sun", 10.0, 1.0), body("moon", 12.0, 13.0)];
    let (matches, _) = build_aspects(
        &bodies,
        &bodies,
        Pairing::WithinChart,
        Timing::Static,
        &settings,
    )
    .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].body_a, "sun");
}

#[test]
fn test_between_charts_includes_same_body() {
    let settings = wide_orbs();
    let natal = vec![body("sun", 100.0, 1.0)];
    let transit = vec![body("sun", 101.0, 1.0)];
    let (matches, _) = build_aspects(
        &transit,
        &natal,
        Pairing::BetweenCharts,
        Timing::Static,
        &settings,
    )
    .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].aspect, AspectKind::Conjunction);
    assert!(matches[0].peak.is_none());
}

#[test]
fn test_transit_peak_estimate() {
    let settings = wide_orbs();
    let as_of = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let transit = vec![body("mars", 95.0, 0.5)];
    let natal = vec![body("sun", 100.0, 1.0)];
    let (matches, _) = build_aspects(
        &transit,
        &natal,
        Pairing::BetweenCharts,
        Timing::TransitAt(as_of),
        &settings,
    )
    .unwrap();
    let m = &matches[0];
    assert_eq!(m.aspect, AspectKind::Conjunction);
    assert!(m.applying);
    let peak = m.peak.unwrap();
    assert!((peak - (as_of + Duration::days(10))).num_seconds().abs() <= 1);
}

#[test]
fn test_node_opposition_suppressed_by_default() {
    let bodies = vec![body("sun", 10.0, 1.0), body("north_node", 190.5, -0.05)];
    let (matches, _) = build_aspects(
        &bodies,
        &bodies,
        Pairing::WithinChart,
        Timing::Static,
        &AspectSettings::default(),
    )
    .unwrap();
    assert!(matches.is_empty());

    let settings = AspectSettings {
        suppress_node_opposition: false,
        ..AspectSettings::default()
    };
    let (matches, _) = build_aspects(&bodies, &bodies, Pairing::WithinChart, Timing::Static, &settings)
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].retrograde);
}

#[test]
fn test_compatibility_mode_drops_out_of_sign_trine() {
    // 29° Aries trine 1° Virgo: fire and earth
    let bodies = vec![body("sun", 29.0, 1.0), body("venus", 151.0, 1.0)];
    let loose = wide_orbs();
    let (matches, _) =
        build_aspects(&bodies, &bodies, Pairing::WithinChart, Timing::Static, &loose).unwrap();
    assert_eq!(matches.len(), 1);

    let strict = AspectSettings {
        compatibility_mode: true,
        ..wide_orbs()
    };
    let (matches, _) =
        build_aspects(&bodies, &bodies, Pairing::WithinChart, Timing::Static, &strict).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_include_objects() {
    let settings = AspectSettings {
        include_objects: vec!["sun".to_string(), "moon".to_string()],
        ..wide_orbs()
    };
    let bodies = vec![
        body("sun", 0.0, 1.0),
        body("moon", 120.0, 13.0),
        body("mars", 240.0, 0.5),
    ];
    let (matches, _) =
        build_aspects(&bodies, &bodies, Pairing::WithinChart, Timing::Static, &settings).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].body_a.as_str(), matches[0].body_b.as_str()), ("sun", "moon"));
}

#[test]
fn test_nan_position_is_an_error() {
    let bodies = vec![body("sun", f64::NAN, 1.0), body("moon", 10.0, 13.0)];
    let result = build_aspects(
        &bodies,
        &bodies,
        Pairing::WithinChart,
        Timing::Static,
        &AspectSettings::default(),
    );
    assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
}

#[test]
fn test_calculator_sets() {
    let calculator = AspectCalculator::new(wide_orbs());

    let mut natal = ChartLayer::new();
    natal.push(body("sun", 10.0, 1.0));
    natal.push(body("moon", 130.0, 13.0));
    natal.houses = Some(HouseCusps::equal(10.0, 280.0));
    let natal = natal.with_angles();

    let mut transit = ChartLayer::new();
    transit.push(body("sun", 190.0, 1.0));

    let set = calculator.within_chart("natal", &natal).unwrap();
    assert_eq!(set.label, "Natal Aspects");
    assert_eq!(set.pairing, Pairing::WithinChart);
    // sun conjunct asc, sun-moon trine, asc-moon trine, ...
    assert!(set
        .matches
        .iter()
        .any(|m| m.aspect == AspectKind::Conjunction && m.body_b == "asc"));

    let mut layers = BTreeMap::new();
    layers.insert("natal".to_string(), natal);
    layers.insert("transit".to_string(), transit);
    let sets = calculator.all_aspect_sets(&layers).unwrap();
    let keys: Vec<_> = sets.keys().cloned().collect();
    assert_eq!(keys, vec!["natal", "natal:transit", "transit"]);
    let cross = &sets["natal:transit"];
    assert_eq!(cross.label, "Natal / Transit Aspects");
    assert!(cross
        .matches
        .iter()
        .any(|m| m.body_a == "sun" && m.body_b == "sun" && m.aspect == AspectKind::Opposition));
}
