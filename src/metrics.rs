use std::collections::HashSet;

pub const PLUS_MINUS: &str = "+/-";

/// Percentages, speeds and other values that are already rates.
pub const NON_SUMMABLE_METRICS: [&str; 12] = [
    "Pass accuracy %",
    "Long pass accuracy %",
    "Duels won %",
    "Aerial duels won %",
    "Dribble success %",
    "Shot accuracy %",
    "Cross accuracy %",
    "Save %",
    "Claim success %",
    "Top speed",
    "Average speed",
    "Intensity",
];

/// Running-load metrics, compared on their own per-90 value rather than as team share.
pub const PHYSICAL_METRICS: [&str; 6] = [
    "Distance",
    "High-speed running",
    "Sprint distance",
    "Sprints",
    "Top speed",
    "Intensity",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricClass {
    Countable,
    Rate,
    Physical,
    PlusMinus,
}

/// Metric classification shared by every position.
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    non_summable: HashSet<String>,
    physical: HashSet<String>,
    plus_minus: String,
}

impl MetricRegistry {
    pub fn new<I, J>(non_summable: I, physical: J, plus_minus: &str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            non_summable: non_summable.into_iter().map(Into::into).collect(),
            physical: physical.into_iter().map(Into::into).collect(),
            plus_minus: plus_minus.to_string(),
        }
    }

    pub fn reference() -> Self {
        Self::new(NON_SUMMABLE_METRICS, PHYSICAL_METRICS, PLUS_MINUS)
    }

    pub fn is_summable(&self, key: &str) -> bool {
        !self.non_summable.contains(key)
    }

    pub fn is_physical(&self, key: &str) -> bool {
        self.physical.contains(key)
    }

    pub fn is_plus_minus(&self, key: &str) -> bool {
        self.plus_minus == key
    }

    /// How a metric enters team-share scoring. Physical wins over the
    /// summable/rate split.
    pub fn class(&self, key: &str) -> MetricClass {
        if self.is_physical(key) {
            MetricClass::Physical
        } else if self.is_plus_minus(key) {
            MetricClass::PlusMinus
        } else if self.is_summable(key) {
            MetricClass::Countable
        } else {
            MetricClass::Rate
        }
    }

    /// Rate-normalize a raw value to 90 minutes. Non-summable metrics pass
    /// through unchanged; zero minutes yields 0.
    pub fn normalize(&self, raw: f64, minutes_played: f64, key: &str) -> f64 {
        if !self.is_summable(key) {
            return raw;
        }
        per_90(raw, minutes_played)
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::reference()
    }
}

pub fn per_90(raw: f64, minutes_played: f64) -> f64 {
    per_minutes(raw, minutes_played, 90.0)
}

pub fn per_100(raw: f64, minutes_played: f64) -> f64 {
    per_minutes(raw, minutes_played, 100.0)
}

fn per_minutes(raw: f64, minutes_played: f64, basis: f64) -> f64 {
    if minutes_played > 0.0 && raw.is_finite() {
        raw / minutes_played * basis
    } else {
        0.0
    }
}
