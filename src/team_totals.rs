use std::collections::{BTreeSet, HashMap};

use crate::metrics::{per_90, MetricRegistry};
use crate::record::{normalize_name, RawRecord, TeamTotalsRow};

/// Per-90 team value per metric, the denominator for team-share scoring.
///
/// Teams are keyed by normalized team name so player rows and team rows from
/// different exports still line up.
#[derive(Debug, Clone, Default)]
pub struct TeamTotals {
    per_team: HashMap<String, HashMap<String, f64>>,
}

impl TeamTotals {
    /// Totals from a team-level export: summable metrics are normalized with
    /// the row's own minutes, rates are taken as-is.
    pub fn from_team_rows(rows: &[TeamTotalsRow], metrics: &MetricRegistry) -> Self {
        let mut per_team = HashMap::with_capacity(rows.len());
        for row in rows {
            if row.minutes_played <= 0.0 {
                log::warn!("team row '{}' has no minutes; summable totals read as 0", row.team);
            }
            let values = row
                .metrics
                .keys()
                .map(|key| {
                    let raw = row.metric(key);
                    let v = if metrics.is_summable(key) {
                        per_90(raw, row.minutes_played)
                    } else {
                        raw
                    };
                    (key.clone(), v)
                })
                .collect::<HashMap<_, _>>();
            per_team.insert(normalize_name(&row.team), values);
        }
        Self { per_team }
    }

    /// Totals derived from the player population: summable metrics are summed
    /// and divided by the summed player minutes, rates are averaged over the
    /// team's players (missing values count as 0).
    pub fn from_players(records: &[RawRecord], metrics: &MetricRegistry) -> Self {
        let mut by_team: HashMap<String, Vec<&RawRecord>> = HashMap::new();
        for rec in records {
            by_team
                .entry(normalize_name(&rec.identity.team))
                .or_default()
                .push(rec);
        }

        let mut per_team = HashMap::with_capacity(by_team.len());
        for (team, players) in by_team {
            let minutes: f64 = players
                .iter()
                .map(|p| p.minutes_played)
                .filter(|m| m.is_finite() && *m > 0.0)
                .sum();
            let keys: BTreeSet<&str> = players
                .iter()
                .flat_map(|p| p.metrics.keys().map(String::as_str))
                .collect();

            let mut values = HashMap::with_capacity(keys.len());
            for key in keys {
                let total: f64 = players.iter().map(|p| p.metric(key)).sum();
                let v = if metrics.is_summable(key) {
                    per_90(total, minutes)
                } else {
                    total / players.len() as f64
                };
                values.insert(key.to_string(), v);
            }
            per_team.insert(team, values);
        }
        Self { per_team }
    }

    /// Team rows win for the teams they cover; every other team falls back
    /// to totals derived from its players.
    pub fn compute(
        records: &[RawRecord],
        team_rows: Option<&[TeamTotalsRow]>,
        metrics: &MetricRegistry,
    ) -> Self {
        let mut out = Self::from_players(records, metrics);
        if let Some(rows) = team_rows {
            let external = Self::from_team_rows(rows, metrics);
            out.per_team.extend(external.per_team);
        }
        out
    }

    pub fn team(&self, team: &str) -> Option<&HashMap<String, f64>> {
        self.per_team.get(&normalize_name(team))
    }

    /// Per-90 team value for `key`; 0 for unknown teams or metrics.
    pub fn get(&self, team: &str, key: &str) -> f64 {
        self.team(team)
            .and_then(|values| values.get(key).copied())
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.per_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_team.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::PositionCode;

    fn player(name: &str, team: &str, minutes: f64) -> RawRecord {
        RawRecord::new(name, team, PositionCode::CentralMid, minutes)
    }

    #[test]
    fn derived_totals_use_summed_minutes() {
        let reg = MetricRegistry::reference();
        let records = vec![
            player("A", "Nord", 90.0)
                .with_metric("Tackles", 4.0)
                .with_metric("Pass accuracy %", 80.0),
            player("B", "Nord", 90.0)
                .with_metric("Tackles", 2.0)
                .with_metric("Pass accuracy %", 90.0),
            player("C", "Süd", 45.0).with_metric("Tackles", 3.0),
        ];
        let totals = TeamTotals::from_players(&records, &reg);
        assert_eq!(totals.len(), 2);
        // (4 + 2) / 180 * 90
        assert!((totals.get("Nord", "Tackles") - 3.0).abs() < 1e-12);
        assert!((totals.get("Nord", "Pass accuracy %") - 85.0).abs() < 1e-12);
        assert!((totals.get("Süd", "Tackles") - 6.0).abs() < 1e-12);
        assert_eq!(totals.get("Süd", "Pass accuracy %"), 0.0);
        assert_eq!(totals.get("West", "Tackles"), 0.0);
    }

    #[test]
    fn zero_minutes_team_reads_zero() {
        let reg = MetricRegistry::reference();
        let records = vec![player("A", "Nord", 0.0).with_metric("Tackles", 4.0)];
        let totals = TeamTotals::from_players(&records, &reg);
        assert_eq!(totals.get("Nord", "Tackles"), 0.0);

        let rows = vec![TeamTotalsRow {
            team: "Nord".to_string(),
            minutes_played: 0.0,
            metrics: HashMap::from([("Tackles".to_string(), 20.0)]),
        }];
        let totals = TeamTotals::from_team_rows(&rows, &reg);
        assert_eq!(totals.get("Nord", "Tackles"), 0.0);
    }

    #[test]
    fn team_rows_take_precedence() {
        let reg = MetricRegistry::reference();
        let records = vec![
            player("A", "Nord", 90.0).with_metric("Tackles", 4.0),
            player("B", "Süd", 90.0).with_metric("Tackles", 1.0),
        ];
        let rows = vec![TeamTotalsRow {
            team: "nord".to_string(),
            minutes_played: 95.0,
            metrics: HashMap::from([
                ("Tackles".to_string(), 19.0),
                ("Duels won %".to_string(), 52.0),
            ]),
        }];
        let totals = TeamTotals::compute(&records, Some(&rows), &reg);
        assert!((totals.get("Nord", "Tackles") - 18.0).abs() < 1e-12);
        assert_eq!(totals.get("Nord", "Duels won %"), 52.0);
        assert!((totals.get("Süd", "Tackles") - 1.0).abs() < 1e-12);
    }
}
