pub mod benchmark;
pub mod composite;
pub mod engine;
pub mod error;
pub mod fake_population;
pub mod metric_score;
pub mod metrics;
pub mod position;
pub mod ranges;
pub mod ranking;
pub mod record;
pub mod report;
pub mod scoring_config;
pub mod team_totals;

pub use engine::{ScoredRecord, ScoringEngine, ScoringFilter, ScoringPass};
pub use position::PositionCode;
pub use record::{RawRecord, TeamTotalsRow};
