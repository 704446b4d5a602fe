use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::composite::CategoryScore;
use crate::engine::ScoringPass;
use crate::position::PositionCode;
use crate::ranges::MetricRange;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub place: usize,
    pub key: String,
    pub name: String,
    pub team: String,
    pub minutes_played: f64,
    pub total_score: f64,
    pub categories: Vec<CategoryScore>,
    pub metric_scores: BTreeMap<String, f64>,
    pub metric_ranks: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringReport {
    pub generated_at: String,
    pub position: PositionCode,
    pub min_minutes: f64,
    pub configured: bool,
    pub ranges: BTreeMap<String, MetricRange>,
    pub rows: Vec<ReportRow>,
}

impl ScoringReport {
    pub fn from_pass(pass: &ScoringPass) -> Self {
        let rows = pass
            .records
            .iter()
            .enumerate()
            .map(|(idx, r)| ReportRow {
                place: idx + 1,
                key: r.key(),
                name: r.record.identity.name.clone(),
                team: r.record.identity.team.clone(),
                minutes_played: r.record.minutes_played,
                total_score: r.total_score,
                categories: r.category_scores.clone(),
                metric_scores: r.metric_scores.clone(),
                metric_ranks: r.metric_ranks.clone(),
            })
            .collect();
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            position: pass.filter.position,
            min_minutes: pass.filter.min_minutes,
            configured: pass.configured,
            ranges: pass.ranges.clone(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize scoring report")
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create report dir {}", parent.display()))?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, self.to_json()?).context("write scoring report")?;
        fs::rename(&tmp, path).context("swap scoring report")?;
        Ok(())
    }
}
