use crate::ranges::MetricRange;
use crate::scoring_config::CategoryKind;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 100.0;
pub const DEGENERATE_SCORE: f64 = 50.0;

/// Map a team-share value onto 1..=100 within the population range.
///
/// A degenerate range scores 50 for a positive shared value and 1 otherwise.
/// Lower-is-better categories are inverted with `101 - score`.
pub fn score_metric(value: f64, range: MetricRange, kind: CategoryKind) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    let base = if range.is_degenerate() {
        if value > 0.0 {
            DEGENERATE_SCORE
        } else {
            MIN_SCORE
        }
    } else {
        let scaled = (value - range.min) / (range.max - range.min) * 99.0 + 1.0;
        scaled.clamp(MIN_SCORE, MAX_SCORE)
    };
    let score = match kind {
        CategoryKind::HigherIsBetter => base,
        CategoryKind::LowerIsBetter => (MAX_SCORE + 1.0) - base,
    };
    score.clamp(MIN_SCORE, MAX_SCORE)
}
