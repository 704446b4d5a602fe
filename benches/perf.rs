use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use pitch_scores::benchmark::{BenchmarkCurve, BenchmarkTable, score_profile};
use pitch_scores::fake_population::{synthetic_gps_readings, synthetic_population};
use pitch_scores::metrics::MetricRegistry;
use pitch_scores::ranges::{compute_ranges, is_eligible};
use pitch_scores::scoring_config::reference_registry;
use pitch_scores::team_totals::TeamTotals;
use pitch_scores::{PositionCode, ScoringEngine, ScoringFilter};

fn bench_position_pass(c: &mut Criterion) {
    let engine = ScoringEngine::reference().expect("built-in weights");
    let records = synthetic_population(18, engine.registry(), engine.metrics(), 11);

    c.bench_function("position_pass_cb", |b| {
        b.iter(|| {
            let pass = engine.score_position(
                black_box(&records),
                None,
                ScoringFilter::new(PositionCode::CenterBack, 45.0),
            );
            black_box(pass.len());
        })
    });
}

fn bench_all_positions(c: &mut Criterion) {
    let engine = ScoringEngine::reference().expect("built-in weights");
    let records = synthetic_population(18, engine.registry(), engine.metrics(), 12);

    c.bench_function("all_positions_pass", |b| {
        b.iter(|| {
            let passes = engine.score_all_positions(black_box(&records), None, 45.0);
            black_box(passes.len());
        })
    });
}

fn bench_team_totals_and_ranges(c: &mut Criterion) {
    let registry = reference_registry().expect("built-in weights");
    let metrics = MetricRegistry::reference();
    let records = synthetic_population(40, registry, &metrics, 13);
    let config = registry.get(PositionCode::CentralMid).expect("8 configured");

    c.bench_function("team_totals_and_ranges", |b| {
        b.iter(|| {
            let totals = TeamTotals::from_players(black_box(&records), &metrics);
            let eligible: Vec<_> = records
                .iter()
                .filter(|r| is_eligible(r, PositionCode::CentralMid, 45.0))
                .collect();
            let ranges = compute_ranges(&eligible, config, &metrics, &totals);
            black_box(ranges.len());
        })
    });
}

fn bench_gps_profiles(c: &mut Criterion) {
    let table = BenchmarkTable::reference();
    let benchmark = table.for_position(PositionCode::Winger);
    let readings = synthetic_gps_readings(PositionCode::Winger, 500, 14);

    c.bench_function("gps_profiles", |b| {
        b.iter(|| {
            let total: u32 = readings
                .iter()
                .map(|r| score_profile(black_box(r), &benchmark, BenchmarkCurve::MatchReport).distance)
                .sum();
            black_box(total);
        })
    });
}

criterion_group!(
    perf,
    bench_position_pass,
    bench_all_positions,
    bench_team_totals_and_ranges,
    bench_gps_profiles
);
criterion_main!(perf);
