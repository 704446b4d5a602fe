use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::position::PositionCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub team: String,
    pub position: PositionCode,
    #[serde(default)]
    pub id: Option<String>,
}

impl Identity {
    /// Stable lookup key: the explicit id when present, otherwise `team|name`
    /// in normalized form.
    pub fn key(&self) -> String {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => key(&normalize_name(&self.team), &normalize_name(&self.name)),
        }
    }
}

/// One player's (or team's) statistics for one scope, a match or a season to date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(alias = "minutes")]
    pub minutes_played: f64,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

impl RawRecord {
    pub fn new(name: &str, team: &str, position: PositionCode, minutes_played: f64) -> Self {
        Self {
            identity: Identity {
                name: name.to_string(),
                team: team.to_string(),
                position,
                id: None,
            },
            minutes_played,
            metrics: HashMap::new(),
        }
    }

    pub fn with_metric(mut self, key: &str, value: f64) -> Self {
        self.metrics.insert(key.to_string(), value);
        self
    }

    /// Raw value for `key`; absent or non-finite values read as 0.
    pub fn metric(&self, key: &str) -> f64 {
        self.metrics
            .get(key)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Team-level totals for one scope, as delivered by a separate team export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTotalsRow {
    pub team: String,
    #[serde(alias = "minutes")]
    pub minutes_played: f64,
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

impl TeamTotalsRow {
    pub fn metric(&self, key: &str) -> f64 {
        self.metrics
            .get(key)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

pub fn normalize_name(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut prev_us = false;
    for ch in lower.chars() {
        let mapped = if ch.is_alphanumeric() {
            Some(ch)
        } else if ch == '&' {
            Some('a')
        } else {
            None
        };

        if let Some(c) = mapped {
            out.push(c);
            prev_us = false;
        } else if !prev_us && !out.is_empty() {
            out.push('_');
            prev_us = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn key(team_norm: &str, player_norm: &str) -> String {
    format!("{team_norm}|{player_norm}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_compacts() {
        assert_eq!(normalize_name(" FC Köln "), "fc_köln");
        assert_eq!(normalize_name("Brighton & Hove"), "brighton_a_hove");
    }

    #[test]
    fn identity_key_prefers_explicit_id() {
        let mut rec = RawRecord::new("Jonas Meyer", "SV Nord", PositionCode::CenterBack, 90.0);
        assert_eq!(rec.identity.key(), "sv_nord|jonas_meyer");
        rec.identity.id = Some(" p-17 ".to_string());
        assert_eq!(rec.identity.key(), "p-17");
    }

    #[test]
    fn missing_metric_reads_zero() {
        let rec = RawRecord::new("A", "T", PositionCode::Winger, 90.0).with_metric("Goals", f64::NAN);
        assert_eq!(rec.metric("Goals"), 0.0);
        assert_eq!(rec.metric("Assists"), 0.0);
    }

    #[test]
    fn record_parses_flat_json() {
        let raw = r#"{"name":"A","team":"T","position":"8","minutes":64,"metrics":{"Passes":41}}"#;
        let rec: RawRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.identity.position, PositionCode::CentralMid);
        assert_eq!(rec.minutes_played, 64.0);
        assert_eq!(rec.metric("Passes"), 41.0);
    }
}
