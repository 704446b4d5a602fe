use std::fs;
use std::path::PathBuf;

use pitch_scores::fake_population::synthetic_population;
use pitch_scores::metrics::MetricRegistry;
use pitch_scores::scoring_config::{
    load_scoring_registry, reference_registry, CategoryKind, CategorySpec, MetricWeight,
    PositionScoringConfig, PositionSpec, ScoringRegistry,
};
use pitch_scores::{PositionCode, RawRecord, ScoringEngine, ScoringFilter, TeamTotalsRow};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

fn cb_fixture_engine() -> ScoringEngine {
    let registry = load_scoring_registry(&fixture_path("cb_tackles_weights.json"))
        .expect("fixture weights should load");
    ScoringEngine::new(registry, MetricRegistry::reference())
}

fn cb_fixture_records() -> (Vec<RawRecord>, Vec<TeamTotalsRow>) {
    let records = serde_json::from_str(&read_fixture("cb_match_records.json"))
        .expect("records fixture should parse");
    let teams = serde_json::from_str(&read_fixture("cb_match_team_totals.json"))
        .expect("team fixture should parse");
    (records, teams)
}

fn metric(key: &str, weight: f64) -> MetricWeight {
    MetricWeight {
        key: key.to_string(),
        weight,
    }
}

fn category(name: &str, weight: f64, kind: CategoryKind, metrics: Vec<MetricWeight>) -> CategorySpec {
    CategorySpec {
        name: name.to_string(),
        weight,
        kind,
        convention: None,
        metrics,
    }
}

#[test]
fn three_centre_backs_against_team_totals() {
    let engine = cb_fixture_engine();
    let (records, teams) = cb_fixture_records();
    let pass = engine.score_position(
        &records,
        Some(&teams),
        ScoringFilter::new(PositionCode::CenterBack, 0.0),
    );

    assert_eq!(pass.len(), 3);
    let range = pass.ranges["Tackles"];
    assert!((range.min - 40.0).abs() < 1e-9);
    assert!((range.max - 60.0).abs() < 1e-9);

    let jonas = pass.get("sv_nord|jonas_meyer").unwrap();
    let emre = pass.get("sv_nord|emre_yildiz").unwrap();
    let lukas = pass.get("sv_nord|lukas_brandt").unwrap();

    assert!((jonas.per_90["Tackles"] - 4.0).abs() < 1e-9);
    assert!((emre.per_90["Tackles"] - 4.0).abs() < 1e-9);
    assert!((lukas.per_90["Tackles"] - 6.0).abs() < 1e-9);
    assert!((jonas.team_share["Tackles"] - 40.0).abs() < 1e-9);
    assert!((lukas.team_share["Tackles"] - 60.0).abs() < 1e-9);

    assert_eq!(jonas.metric_scores["Tackles"], 1.0);
    assert_eq!(emre.metric_scores["Tackles"], 1.0);
    assert_eq!(lukas.metric_scores["Tackles"], 100.0);

    assert_eq!(lukas.metric_ranks["Tackles"], 1);
    assert_eq!(jonas.metric_ranks["Tackles"], 2);
    assert_eq!(emre.metric_ranks["Tackles"], 3);

    // Every centre back blocks 20% of the team per 90.
    for rec in &pass.records {
        assert_eq!(rec.metric_scores["Blocks"], 50.0);
    }

    // Ball losses per 90: 3, 4, 1 of a team 12 -> inverted scores 34, 1, 100.
    assert!((jonas.metric_scores["Ball losses"] - 34.0).abs() < 1e-9);
    assert_eq!(emre.metric_scores["Ball losses"], 1.0);
    assert_eq!(lukas.metric_scores["Ball losses"], 100.0);
    assert_eq!(lukas.metric_ranks["Ball losses"], 1);
    assert_eq!(jonas.metric_ranks["Ball losses"], 2);
    assert_eq!(emre.metric_ranks["Ball losses"], 3);

    assert!((jonas.category_score("Defense").unwrap() - 15.0).abs() < 1e-9);
    assert!((lukas.category_score("Defense").unwrap() - 600.0 / 7.0).abs() < 1e-9);
    assert!((jonas.total_score - 20.7).abs() < 1e-9);
    assert!((emre.total_score - 10.8).abs() < 1e-9);
    assert!((lukas.total_score - 90.0).abs() < 1e-9);

    let order: Vec<&str> = pass
        .records
        .iter()
        .map(|r| r.record.identity.name.as_str())
        .collect();
    assert_eq!(order, vec!["Lukas Brandt", "Jonas Meyer", "Emre Yildiz"]);

    let ranks = pass.rank_map("Tackles");
    assert_eq!(ranks["sv_nord|emre_yildiz"], 3);
}

#[test]
fn zero_minute_records_never_scored() {
    let engine = cb_fixture_engine();
    let (records, teams) = cb_fixture_records();
    for threshold in [0.0, 30.0, 90.0] {
        let pass = engine.score_position(
            &records,
            Some(&teams),
            ScoringFilter::new(PositionCode::CenterBack, threshold),
        );
        assert!(pass.get("sv_nord|tim_vogel").is_none());
    }
}

#[test]
fn minutes_threshold_changes_population() {
    let engine = cb_fixture_engine();
    let (records, teams) = cb_fixture_records();
    let pass = engine.score_position(
        &records,
        Some(&teams),
        ScoringFilter::new(PositionCode::CenterBack, 60.0),
    );
    assert_eq!(pass.len(), 2);
    assert!(pass.get("sv_nord|emre_yildiz").is_none());
    // Blocks stay degenerate, tackles re-scale between the two starters.
    assert_eq!(pass.get("sv_nord|jonas_meyer").unwrap().metric_scores["Tackles"], 1.0);
    assert_eq!(pass.get("sv_nord|lukas_brandt").unwrap().metric_scores["Tackles"], 100.0);

    let none = engine.score_position(
        &records,
        Some(&teams),
        ScoringFilter::new(PositionCode::CenterBack, 120.0),
    );
    assert!(none.is_empty());
}

#[test]
fn identical_values_score_50_or_1() {
    let engine = ScoringEngine::reference().unwrap();
    let records: Vec<RawRecord> = (0..4)
        .map(|i| {
            RawRecord::new(&format!("P{i}"), "Ost", PositionCode::CentralMid, 90.0)
                .with_metric("Passes", 40.0)
                .with_metric("Goals", 0.0)
        })
        .collect();
    let pass = engine.score_position(&records, None, ScoringFilter::new(PositionCode::CentralMid, 0.0));
    assert_eq!(pass.len(), 4);
    for rec in &pass.records {
        assert_eq!(rec.metric_scores["Passes"], 50.0);
        assert_eq!(rec.metric_scores["Goals"], 1.0);
    }
}

#[test]
fn perfect_record_totals_exactly_100() {
    let config = PositionScoringConfig::from_spec(PositionSpec {
        position: PositionCode::AttackingMid,
        categories: vec![
            category(
                "Attack",
                0.5,
                CategoryKind::HigherIsBetter,
                vec![metric("Goals", 0.3), metric("Key passes", 0.2)],
            ),
            category(
                "Creation",
                0.3,
                CategoryKind::HigherIsBetter,
                vec![metric("Dribbles", 0.6), metric("Pass accuracy %", 0.4)],
            ),
            category(
                "Physical",
                0.2,
                CategoryKind::HigherIsBetter,
                vec![metric("Distance", 0.5), metric("Top speed", 0.5)],
            ),
        ],
    })
    .unwrap();
    let mut registry = ScoringRegistry::default();
    registry.insert(config);
    let engine = ScoringEngine::new(registry, MetricRegistry::reference());

    let make = |name: &str, goals: f64, kp: f64, dr: f64, pct: f64, dist: f64, speed: f64| {
        RawRecord::new(name, "West", PositionCode::AttackingMid, 90.0)
            .with_metric("Goals", goals)
            .with_metric("Key passes", kp)
            .with_metric("Dribbles", dr)
            .with_metric("Pass accuracy %", pct)
            .with_metric("Distance", dist)
            .with_metric("Top speed", speed)
    };
    let records = vec![
        make("A", 1.0, 2.0, 3.0, 80.0, 10_000.0, 31.0),
        make("Best", 2.0, 5.0, 6.0, 91.0, 11_800.0, 34.2),
        make("C", 0.0, 1.0, 1.0, 72.0, 9_100.0, 29.5),
        make("D", 1.0, 3.0, 2.0, 85.0, 10_400.0, 32.8),
        // Bench players make up the rest of the team totals.
        RawRecord::new("E", "West", PositionCode::CenterBack, 90.0)
            .with_metric("Goals", 1.0)
            .with_metric("Pass accuracy %", 88.0),
    ];

    let pass = engine.score_position(&records, None, ScoringFilter::new(PositionCode::AttackingMid, 0.0));
    let best = &pass.records[0];
    assert_eq!(best.record.identity.name, "Best");
    assert!((best.total_score - 100.0).abs() < 1e-6);
    for c in &best.category_scores {
        assert!((c.score - 100.0).abs() < 1e-6, "{}", c.name);
    }
    assert!(best.metric_ranks.values().all(|r| *r == 1));
}

#[test]
fn fewer_ball_losses_never_score_worse() {
    let engine = ScoringEngine::reference().unwrap();
    let records = vec![
        RawRecord::new("Careless", "Süd", PositionCode::Winger, 90.0).with_metric("Ball losses", 9.0),
        RawRecord::new("Tidy", "Süd", PositionCode::Winger, 90.0).with_metric("Ball losses", 2.0),
        RawRecord::new("Middle", "Süd", PositionCode::Winger, 60.0).with_metric("Ball losses", 4.0),
    ];
    let pass = engine.score_position(&records, None, ScoringFilter::new(PositionCode::Winger, 0.0));
    let tidy = pass.get("süd|tidy").unwrap();
    let middle = pass.get("süd|middle").unwrap();
    let careless = pass.get("süd|careless").unwrap();

    // per 90: 2, 6, 9
    assert!(tidy.metric_scores["Ball losses"] >= middle.metric_scores["Ball losses"]);
    assert!(middle.metric_scores["Ball losses"] >= careless.metric_scores["Ball losses"]);
    assert_eq!(tidy.metric_scores["Ball losses"], 100.0);
    assert_eq!(careless.metric_scores["Ball losses"], 1.0);
    assert_eq!(tidy.metric_ranks["Ball losses"], 1);
    assert_eq!(middle.metric_ranks["Ball losses"], 2);
    assert_eq!(careless.metric_ranks["Ball losses"], 3);
}

#[test]
fn synthetic_league_is_bounded_and_fully_ranked() {
    let registry = reference_registry().unwrap();
    let metrics = MetricRegistry::reference();
    let records = synthetic_population(12, registry, &metrics, 99);
    let engine = ScoringEngine::new(registry.clone(), metrics);

    let passes = engine.score_all_positions(&records, None, 45.0);
    assert_eq!(passes.len(), PositionCode::ALL.len());
    for (position, pass) in &passes {
        assert!(pass.configured, "{position}");
        let n = pass.len() as u32;
        for rec in &pass.records {
            assert!(rec.record.minutes_played >= 45.0);
            for score in rec.metric_scores.values() {
                assert!((1.0..=100.0).contains(score));
            }
            assert!(rec.total_score >= 1.0 - 1e-9 && rec.total_score <= 100.0 + 1e-9);
        }
        for metric in pass.ranges.keys() {
            let mut ranks: Vec<u32> = pass.records.iter().map(|r| r.metric_ranks[metric]).collect();
            ranks.sort_unstable();
            assert_eq!(ranks, (1..=n).collect::<Vec<u32>>(), "{position}/{metric}");
        }
        for pair in pass.records.windows(2) {
            assert!(pair[0].total_score >= pair[1].total_score);
        }
    }
}

#[test]
fn recompute_replaces_whole_population() {
    let engine = cb_fixture_engine();
    let (records, teams) = cb_fixture_records();
    let wide = engine.score_position(&records, Some(&teams), ScoringFilter::new(PositionCode::CenterBack, 0.0));
    let narrow = engine.score_position(&records, Some(&teams), ScoringFilter::new(PositionCode::CenterBack, 60.0));
    let again = engine.score_position(&records, Some(&teams), ScoringFilter::new(PositionCode::CenterBack, 0.0));
    assert_ne!(wide.ranges["Ball losses"], narrow.ranges["Ball losses"]);
    assert_eq!(wide, again);
}
