//! Configuration errors.
//!
//! Scoring itself never fails; only loading a weights configuration does.

use thiserror::Error;

use crate::position::PositionCode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{position}: category weights sum to {sum:.4}, expected 1.0")]
    CategoryWeightsSum { position: PositionCode, sum: f64 },

    #[error("{position}/{category}: metric weights sum to {sum:.4}, matching neither 1.0 nor the category weight {weight:.4}")]
    MetricWeightsMismatch {
        position: PositionCode,
        category: String,
        sum: f64,
        weight: f64,
    },

    #[error("{position}: metric '{metric}' appears in more than one category")]
    DuplicateMetric { position: PositionCode, metric: String },

    #[error("{position}/{category}: negative weight {weight}")]
    NegativeWeight {
        position: PositionCode,
        category: String,
        weight: f64,
    },

    #[error("{position}/{category}: category declares no metrics")]
    EmptyCategory { position: PositionCode, category: String },

    #[error("position '{0}' is declared more than once")]
    DuplicatePosition(PositionCode),

    #[error("unrecognized position code in configuration")]
    UnknownPosition,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
