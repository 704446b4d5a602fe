use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::composite::{score_categories, score_total, CategoryScore};
use crate::metric_score::score_metric;
use crate::metrics::MetricRegistry;
use crate::position::PositionCode;
use crate::ranges::{is_eligible, ranges_from_shares, team_shares, MetricRange};
use crate::ranking::rank_metric;
use crate::record::{RawRecord, TeamTotalsRow};
use crate::scoring_config::{reference_registry, PositionScoringConfig, ScoringRegistry};
use crate::team_totals::TeamTotals;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringFilter {
    pub position: PositionCode,
    pub min_minutes: f64,
}

impl ScoringFilter {
    pub fn new(position: PositionCode, min_minutes: f64) -> Self {
        Self {
            position,
            min_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: RawRecord,
    pub per_90: BTreeMap<String, f64>,
    pub team_share: BTreeMap<String, f64>,
    pub metric_scores: BTreeMap<String, f64>,
    pub category_scores: Vec<CategoryScore>,
    pub total_score: f64,
    pub metric_ranks: BTreeMap<String, u32>,
}

impl ScoredRecord {
    /// A listed but unscored record, used when the position has no configuration.
    pub fn unscored(record: RawRecord) -> Self {
        Self {
            record,
            per_90: BTreeMap::new(),
            team_share: BTreeMap::new(),
            metric_scores: BTreeMap::new(),
            category_scores: Vec::new(),
            total_score: 0.0,
            metric_ranks: BTreeMap::new(),
        }
    }

    pub fn is_scored(&self) -> bool {
        !self.category_scores.is_empty()
    }

    pub fn key(&self) -> String {
        self.record.identity.key()
    }

    pub fn category_score(&self, name: &str) -> Option<f64> {
        self.category_scores
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.score)
    }
}

/// Result of one scoring pass, sorted by total score descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPass {
    pub filter: ScoringFilter,
    pub configured: bool,
    pub ranges: BTreeMap<String, MetricRange>,
    pub records: Vec<ScoredRecord>,
}

impl ScoringPass {
    fn empty(filter: ScoringFilter, configured: bool) -> Self {
        Self {
            filter,
            configured,
            ranges: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, key: &str) -> Option<&ScoredRecord> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Rank of every record for `metric`, keyed by record key.
    pub fn rank_map(&self, metric: &str) -> HashMap<String, u32> {
        self.records
            .iter()
            .filter_map(|r| r.metric_ranks.get(metric).map(|rank| (r.key(), *rank)))
            .collect()
    }
}

pub struct ScoringEngine {
    registry: ScoringRegistry,
    metrics: MetricRegistry,
}

impl ScoringEngine {
    pub fn new(registry: ScoringRegistry, metrics: MetricRegistry) -> Self {
        Self { registry, metrics }
    }

    /// Engine over the built-in position weights and metric classification.
    pub fn reference() -> Result<Self> {
        Ok(Self::new(
            reference_registry()?.clone(),
            MetricRegistry::reference(),
        ))
    }

    pub fn registry(&self) -> &ScoringRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &MetricRegistry {
        &self.metrics
    }

    /// Score every record matching `filter` against the others that match it.
    ///
    /// Team totals come from `team_rows` where given and from the whole
    /// `records` population otherwise, so pass all players of the scope, not
    /// only the selected position.
    pub fn score_position(
        &self,
        records: &[RawRecord],
        team_rows: Option<&[TeamTotalsRow]>,
        filter: ScoringFilter,
    ) -> ScoringPass {
        let config = self.registry.get(filter.position);
        let eligible: Vec<&RawRecord> = records
            .iter()
            .filter(|r| is_eligible(r, filter.position, filter.min_minutes))
            .collect();

        if eligible.is_empty() {
            log::debug!(
                "scoring pass {}: no records with at least {} minutes",
                filter.position,
                filter.min_minutes
            );
            return ScoringPass::empty(filter, config.is_some());
        }

        let Some(config) = config else {
            log::warn!(
                "no scoring configuration for position {}; {} records left unscored",
                filter.position,
                eligible.len()
            );
            let mut pass = ScoringPass::empty(filter, false);
            pass.records = eligible
                .into_iter()
                .cloned()
                .map(ScoredRecord::unscored)
                .collect();
            return pass;
        };

        let totals = TeamTotals::compute(records, team_rows, &self.metrics);
        let keys = config.metric_keys();
        let shares: Vec<BTreeMap<String, f64>> = eligible
            .par_iter()
            .map(|rec| team_shares(rec, &keys, &self.metrics, &totals))
            .collect();
        let ranges = ranges_from_shares(&shares, &keys);

        let mut scored: Vec<ScoredRecord> = eligible
            .iter()
            .zip(shares)
            .map(|(rec, share)| self.score_record(rec, share, config, &ranges))
            .collect();

        for key in keys.iter().filter(|k| ranges.contains_key(**k)) {
            let ranks = rank_metric(&scored, key, config.kind_of(key));
            for (rec, rank) in scored.iter_mut().zip(ranks) {
                rec.metric_ranks.insert(key.to_string(), rank);
            }
        }

        scored.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

        log::debug!(
            "scoring pass {}: {} eligible, {}/{} metrics scoreable",
            filter.position,
            scored.len(),
            ranges.len(),
            keys.len()
        );

        ScoringPass {
            filter,
            configured: true,
            ranges,
            records: scored,
        }
    }

    /// One independent pass per position present in `records`.
    pub fn score_all_positions(
        &self,
        records: &[RawRecord],
        team_rows: Option<&[TeamTotalsRow]>,
        min_minutes: f64,
    ) -> BTreeMap<PositionCode, ScoringPass> {
        let positions: BTreeSet<PositionCode> =
            records.iter().map(|r| r.identity.position).collect();
        positions
            .into_iter()
            .map(|position| {
                let filter = ScoringFilter::new(position, min_minutes);
                (position, self.score_position(records, team_rows, filter))
            })
            .collect()
    }

    fn score_record(
        &self,
        record: &RawRecord,
        team_share: BTreeMap<String, f64>,
        config: &PositionScoringConfig,
        ranges: &BTreeMap<String, MetricRange>,
    ) -> ScoredRecord {
        let per_90 = team_share
            .keys()
            .map(|key| {
                let v = self
                    .metrics
                    .normalize(record.metric(key), record.minutes_played, key);
                (key.clone(), v)
            })
            .collect();
        let metric_scores: BTreeMap<String, f64> = team_share
            .iter()
            .filter_map(|(key, value)| {
                let range = ranges.get(key)?;
                Some((key.clone(), score_metric(*value, *range, config.kind_of(key))))
            })
            .collect();
        let category_scores = score_categories(&metric_scores, config);
        let total_score = score_total(&category_scores);

        ScoredRecord {
            record: record.clone(),
            per_90,
            team_share,
            metric_scores,
            category_scores,
            total_score,
            metric_ranks: BTreeMap::new(),
        }
    }
}
