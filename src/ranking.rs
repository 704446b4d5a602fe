use crate::engine::ScoredRecord;
use crate::scoring_config::CategoryKind;

/// Ranks 1..=N for one metric, aligned with `records`.
///
/// Lower-is-better metrics rank by per-90 value ascending, all others by
/// metric score descending. Ties keep input order.
pub fn rank_metric(records: &[ScoredRecord], key: &str, kind: CategoryKind) -> Vec<u32> {
    let per_90 = |idx: usize| records[idx].per_90.get(key).copied().unwrap_or(0.0);
    let score = |idx: usize| records[idx].metric_scores.get(key).copied().unwrap_or(0.0);

    let mut order: Vec<usize> = (0..records.len()).collect();
    match kind {
        CategoryKind::LowerIsBetter => order.sort_by(|&a, &b| per_90(a).total_cmp(&per_90(b))),
        CategoryKind::HigherIsBetter => order.sort_by(|&a, &b| score(b).total_cmp(&score(a))),
    }

    let mut ranks = vec![0u32; records.len()];
    for (pos, idx) in order.into_iter().enumerate() {
        ranks[idx] = pos as u32 + 1;
    }
    ranks
}
