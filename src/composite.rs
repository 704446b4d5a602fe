use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring_config::{Category, PositionScoringConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

/// Weighted sum of a category's metric scores using each metric's share of
/// the category. Unscored metrics contribute nothing.
pub fn score_category(metric_scores: &BTreeMap<String, f64>, category: &Category) -> f64 {
    category
        .proportions()
        .filter_map(|(key, share)| metric_scores.get(key).map(|s| s * share))
        .sum()
}

pub fn score_categories(
    metric_scores: &BTreeMap<String, f64>,
    config: &PositionScoringConfig,
) -> Vec<CategoryScore> {
    config
        .categories
        .iter()
        .map(|c| CategoryScore {
            name: c.name.clone(),
            weight: c.weight,
            score: score_category(metric_scores, c),
        })
        .collect()
}

/// Category scores weighted by category weight. Weights sum to 1, so a record
/// scoring 100 everywhere totals exactly 100.
pub fn score_total(category_scores: &[CategoryScore]) -> f64 {
    category_scores.iter().map(|c| c.score * c.weight).sum()
}
