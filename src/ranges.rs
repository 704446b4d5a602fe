use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::metrics::{MetricClass, MetricRegistry};
use crate::position::PositionCode;
use crate::record::RawRecord;
use crate::scoring_config::PositionScoringConfig;
use crate::team_totals::TeamTotals;

/// Extremes of one metric's team-share value over a scoring population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

pub fn is_eligible(record: &RawRecord, position: PositionCode, min_minutes: f64) -> bool {
    record.identity.position == position
        && record.minutes_played >= min_minutes
        && record.minutes_played > 0.0
}

/// Team-share value of one metric for one record.
///
/// Physical metrics use the record's own per-90 value, `+/-` the signed
/// difference to the team value, everything else the percentage of the team's
/// per-90 value (0 when the team value is not positive).
pub fn team_share(
    record: &RawRecord,
    key: &str,
    metrics: &MetricRegistry,
    totals: &TeamTotals,
) -> f64 {
    let own = metrics.normalize(record.metric(key), record.minutes_played, key);
    match metrics.class(key) {
        MetricClass::Physical => own,
        MetricClass::PlusMinus => own - totals.get(&record.identity.team, key),
        MetricClass::Countable | MetricClass::Rate => {
            let team = totals.get(&record.identity.team, key);
            if team > 0.0 {
                own / team * 100.0
            } else {
                0.0
            }
        }
    }
}

pub fn team_shares(
    record: &RawRecord,
    keys: &[&str],
    metrics: &MetricRegistry,
    totals: &TeamTotals,
) -> BTreeMap<String, f64> {
    keys.iter()
        .map(|key| (key.to_string(), team_share(record, key, metrics, totals)))
        .collect()
}

/// Ranges for every configured metric of the eligible population. Metrics with
/// no finite value anywhere are left out and count as unscoreable.
pub fn compute_ranges(
    eligible: &[&RawRecord],
    config: &PositionScoringConfig,
    metrics: &MetricRegistry,
    totals: &TeamTotals,
) -> BTreeMap<String, MetricRange> {
    let keys = config.metric_keys();
    let shares: Vec<BTreeMap<String, f64>> = eligible
        .iter()
        .map(|rec| team_shares(rec, &keys, metrics, totals))
        .collect();
    ranges_from_shares(&shares, &keys)
}

/// Metrics are independent of each other, so each range is computed on its own.
pub fn ranges_from_shares(
    shares: &[BTreeMap<String, f64>],
    keys: &[&str],
) -> BTreeMap<String, MetricRange> {
    keys.par_iter()
        .filter_map(|key| {
            let range = range_of(shares.iter().filter_map(|s| s.get(*key).copied()))?;
            Some((key.to_string(), range))
        })
        .collect()
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<MetricRange> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<MetricRange>, v| match acc {
            None => Some(MetricRange { min: v, max: v }),
            Some(r) => Some(MetricRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
}
