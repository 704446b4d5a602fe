//! GPS realism scores: a player's running load per 100 minutes against a fixed
//! positional target. Independent of the population-relative scoring pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::metrics::per_100;
use crate::position::PositionCode;

/// Targets per 100 minutes of play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionBenchmark {
    /// Total distance in metres.
    pub distance: f64,
    /// Distance above the high-speed threshold in metres.
    pub high_speed_distance: f64,
    /// Distance above the sprint threshold in metres.
    pub sprint_distance: f64,
    /// High-intensity efforts.
    pub intensity: f64,
}

const STRIKER: PositionBenchmark = PositionBenchmark {
    distance: 10_800.0,
    high_speed_distance: 900.0,
    sprint_distance: 300.0,
    intensity: 66.0,
};

/// Below-benchmark curves. Above the benchmark both score `100 * ratio`,
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkCurve {
    /// `100 * ratio^1.5`, used in match reports. Continuous at 1.0.
    MatchReport,
    /// `100 * ratio^2 * 0.9`, used in season analysis. Drops from 100 to 90
    /// just below 1.0.
    SeasonAnalysis,
}

impl BenchmarkCurve {
    pub fn below_benchmark(self, ratio: f64) -> f64 {
        match self {
            BenchmarkCurve::MatchReport => 100.0 * ratio.powf(1.5),
            BenchmarkCurve::SeasonAnalysis => 100.0 * ratio.powi(2) * 0.9,
        }
    }

    pub fn score(self, ratio: f64) -> u32 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return 0;
        }
        let raw = if ratio >= 1.0 {
            100.0 * ratio
        } else {
            self.below_benchmark(ratio)
        };
        raw.round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkScores {
    pub distance_score: u32,
    pub intensity_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GpsReading {
    pub minutes_played: f64,
    pub distance: f64,
    pub high_speed_distance: f64,
    pub sprint_distance: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileScores {
    pub distance: u32,
    pub high_speed: u32,
    pub sprint: u32,
    pub intensity: u32,
}

/// Raw quantity per 100 minutes divided by the benchmark; 0 without minutes or
/// without a positive benchmark.
pub fn benchmark_ratio(raw: f64, minutes_played: f64, benchmark: f64) -> f64 {
    if benchmark > 0.0 {
        per_100(raw, minutes_played) / benchmark
    } else {
        0.0
    }
}

pub fn score_against_benchmark(
    distance: f64,
    intensity: f64,
    minutes_played: f64,
    benchmark: &PositionBenchmark,
    curve: BenchmarkCurve,
) -> BenchmarkScores {
    BenchmarkScores {
        distance_score: curve.score(benchmark_ratio(distance, minutes_played, benchmark.distance)),
        intensity_score: curve.score(benchmark_ratio(intensity, minutes_played, benchmark.intensity)),
    }
}

pub fn score_profile(
    reading: &GpsReading,
    benchmark: &PositionBenchmark,
    curve: BenchmarkCurve,
) -> ProfileScores {
    let m = reading.minutes_played;
    ProfileScores {
        distance: curve.score(benchmark_ratio(reading.distance, m, benchmark.distance)),
        high_speed: curve.score(benchmark_ratio(
            reading.high_speed_distance,
            m,
            benchmark.high_speed_distance,
        )),
        sprint: curve.score(benchmark_ratio(reading.sprint_distance, m, benchmark.sprint_distance)),
        intensity: curve.score(benchmark_ratio(reading.intensity, m, benchmark.intensity)),
    }
}

#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    entries: HashMap<PositionCode, PositionBenchmark>,
}

impl BenchmarkTable {
    pub fn reference() -> Self {
        let full_back = PositionBenchmark {
            distance: 11_300.0,
            high_speed_distance: 950.0,
            sprint_distance: 330.0,
            intensity: 70.0,
        };
        let entries = HashMap::from([
            (
                PositionCode::CenterBack,
                PositionBenchmark {
                    distance: 10_500.0,
                    high_speed_distance: 650.0,
                    sprint_distance: 180.0,
                    intensity: 55.0,
                },
            ),
            (PositionCode::LeftBack, full_back),
            (PositionCode::RightBack, full_back),
            (
                PositionCode::DefensiveMid,
                PositionBenchmark {
                    distance: 11_800.0,
                    high_speed_distance: 700.0,
                    sprint_distance: 160.0,
                    intensity: 68.0,
                },
            ),
            (
                PositionCode::CentralMid,
                PositionBenchmark {
                    distance: 12_300.0,
                    high_speed_distance: 850.0,
                    sprint_distance: 200.0,
                    intensity: 75.0,
                },
            ),
            (
                PositionCode::AttackingMid,
                PositionBenchmark {
                    distance: 11_900.0,
                    high_speed_distance: 850.0,
                    sprint_distance: 230.0,
                    intensity: 72.0,
                },
            ),
            (
                PositionCode::Winger,
                PositionBenchmark {
                    distance: 11_500.0,
                    high_speed_distance: 1_050.0,
                    sprint_distance: 380.0,
                    intensity: 74.0,
                },
            ),
            (PositionCode::CenterForward, STRIKER),
            (
                PositionCode::Goalkeeper,
                PositionBenchmark {
                    distance: 5_600.0,
                    high_speed_distance: 80.0,
                    sprint_distance: 15.0,
                    intensity: 12.0,
                },
            ),
        ]);
        Self { entries }
    }

    pub fn with_entry(mut self, position: PositionCode, benchmark: PositionBenchmark) -> Self {
        self.entries.insert(position, benchmark);
        self
    }

    /// Benchmark for `position`, falling back to the striker entry.
    pub fn for_position(&self, position: PositionCode) -> PositionBenchmark {
        self.entries
            .get(&position)
            .or_else(|| self.entries.get(&PositionCode::CenterForward))
            .copied()
            .unwrap_or(STRIKER)
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::reference()
    }
}
