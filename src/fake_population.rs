use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::benchmark::{BenchmarkTable, GpsReading};
use crate::metrics::{MetricRegistry, PLUS_MINUS};
use crate::position::PositionCode;
use crate::record::RawRecord;
use crate::scoring_config::ScoringRegistry;

const STARTERS: [PositionCode; 11] = [
    PositionCode::Goalkeeper,
    PositionCode::LeftBack,
    PositionCode::CenterBack,
    PositionCode::CenterBack,
    PositionCode::RightBack,
    PositionCode::DefensiveMid,
    PositionCode::CentralMid,
    PositionCode::AttackingMid,
    PositionCode::Winger,
    PositionCode::Winger,
    PositionCode::CenterForward,
];

const BENCH: [PositionCode; 3] = [
    PositionCode::CentralMid,
    PositionCode::Winger,
    PositionCode::CenterForward,
];

/// Seeded synthetic match-day population: eleven starters and three
/// substitutes per team, with values for every metric the registry scores
/// at each player's position.
pub fn synthetic_population(
    teams: usize,
    registry: &ScoringRegistry,
    metrics: &MetricRegistry,
    seed: u64,
) -> Vec<RawRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(teams * (STARTERS.len() + BENCH.len()));
    for t in 0..teams {
        let team = format!("Team {}", t + 1);
        for (idx, position) in STARTERS.iter().chain(BENCH.iter()).enumerate() {
            let minutes = if idx < STARTERS.len() {
                rng.gen_range(60..=90) as f64
            } else {
                rng.gen_range(0..=30) as f64
            };
            let mut rec = RawRecord::new(&format!("Player {}-{}", t + 1, idx + 1), &team, *position, minutes);
            rec.identity.id = Some(format!("t{}p{}", t + 1, idx + 1));
            if let Some(config) = registry.get(*position) {
                for key in config.metric_keys() {
                    let value = sample_metric(&mut rng, key, minutes, metrics);
                    rec.metrics.insert(key.to_string(), value);
                }
            }
            out.push(rec);
        }
    }
    out
}

fn sample_metric(rng: &mut StdRng, key: &str, minutes: f64, metrics: &MetricRegistry) -> f64 {
    if minutes <= 0.0 {
        return 0.0;
    }
    let share = minutes / 90.0;
    match key {
        "Top speed" => rng.gen_range(27.0..35.5),
        "Intensity" => rng.gen_range(30.0..90.0),
        "Distance" => rng.gen_range(8_000.0..12_500.0) * share,
        "High-speed running" => rng.gen_range(300.0..1_200.0) * share,
        "Sprint distance" => rng.gen_range(80.0..450.0) * share,
        _ if key == PLUS_MINUS => rng.gen_range(-3..=3) as f64,
        _ if !metrics.is_summable(key) => rng.gen_range(45.0..95.0),
        _ => (rng.gen_range(0.0..7.0) * share).round(),
    }
}

/// Seeded GPS readings for `count` players of one position.
pub fn synthetic_gps_readings(position: PositionCode, count: usize, seed: u64) -> Vec<GpsReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let target = BenchmarkTable::reference().for_position(position);
    (0..count)
        .map(|_| {
            let minutes = rng.gen_range(20..=95) as f64;
            let per_min = minutes / 100.0;
            GpsReading {
                minutes_played: minutes,
                distance: target.distance * per_min * rng.gen_range(0.7..1.2),
                high_speed_distance: target.high_speed_distance * per_min * rng.gen_range(0.5..1.4),
                sprint_distance: target.sprint_distance * per_min * rng.gen_range(0.4..1.5),
                intensity: target.intensity * per_min * rng.gen_range(0.6..1.3),
            }
        })
        .collect()
}
