use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::position::PositionCode;

pub const WEIGHT_TOLERANCE: f64 = 1e-3;

static REFERENCE_REGISTRY: OnceCell<ScoringRegistry> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    HigherIsBetter,
    /// Turnovers, goalkeeper mistakes: fewer is better, scores are inverted.
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightConvention {
    /// Metric weights sum to 1 and are shares of the category.
    Proportional,
    /// Metric weights sum to the category weight and are shares of the total score.
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    pub key: String,
    pub weight: f64,
}

/// Metric weights of one category with their convention resolved at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricWeights {
    Proportional(Vec<MetricWeight>),
    Absolute(Vec<MetricWeight>),
}

impl MetricWeights {
    pub fn convention(&self) -> WeightConvention {
        match self {
            MetricWeights::Proportional(_) => WeightConvention::Proportional,
            MetricWeights::Absolute(_) => WeightConvention::Absolute,
        }
    }

    pub fn entries(&self) -> &[MetricWeight] {
        match self {
            MetricWeights::Proportional(items) | MetricWeights::Absolute(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub weight: f64,
    pub kind: CategoryKind,
    pub metrics: MetricWeights,
}

impl Category {
    /// Each metric's share of this category; shares sum to 1 for a valid category.
    pub fn proportions(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let category_weight = self.weight;
        let absolute = matches!(self.metrics, MetricWeights::Absolute(_));
        self.metrics.entries().iter().map(move |m| {
            let share = if !absolute {
                m.weight
            } else if category_weight > 0.0 {
                m.weight / category_weight
            } else {
                0.0
            };
            (m.key.as_str(), share)
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metrics.entries().iter().any(|m| m.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionScoringConfig {
    pub position: PositionCode,
    pub categories: Vec<Category>,
}

impl PositionScoringConfig {
    pub fn from_spec(spec: PositionSpec) -> Result<Self, ConfigError> {
        let position = spec.position;
        if position == PositionCode::Unknown {
            return Err(ConfigError::UnknownPosition);
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut categories = Vec::with_capacity(spec.categories.len());
        for cat in spec.categories {
            for m in &cat.metrics {
                if !seen.insert(m.key.clone()) {
                    return Err(ConfigError::DuplicateMetric {
                        position,
                        metric: m.key.clone(),
                    });
                }
            }
            categories.push(resolve_category(position, cat)?);
        }

        let sum: f64 = categories.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::CategoryWeightsSum { position, sum });
        }

        Ok(Self {
            position,
            categories,
        })
    }

    /// Metric keys in declaration order.
    pub fn metric_keys(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.metrics.entries().iter().map(|m| m.key.as_str()))
            .collect()
    }

    pub fn category_of(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.contains(key))
    }

    pub fn kind_of(&self, key: &str) -> CategoryKind {
        self.category_of(key)
            .map(|c| c.kind)
            .unwrap_or_default()
    }
}

fn resolve_category(position: PositionCode, spec: CategorySpec) -> Result<Category, ConfigError> {
    if spec.metrics.is_empty() {
        return Err(ConfigError::EmptyCategory {
            position,
            category: spec.name,
        });
    }
    let negative = std::iter::once(spec.weight)
        .chain(spec.metrics.iter().map(|m| m.weight))
        .find(|w| !w.is_finite() || *w < 0.0);
    if let Some(weight) = negative {
        return Err(ConfigError::NegativeWeight {
            position,
            category: spec.name,
            weight,
        });
    }

    let sum: f64 = spec.metrics.iter().map(|m| m.weight).sum();
    let matches_one = (sum - 1.0).abs() <= WEIGHT_TOLERANCE;
    let matches_weight = (sum - spec.weight).abs() <= WEIGHT_TOLERANCE;

    let convention = match spec.convention {
        Some(WeightConvention::Proportional) if matches_one => Some(WeightConvention::Proportional),
        Some(WeightConvention::Absolute) if matches_weight => Some(WeightConvention::Absolute),
        Some(_) => None,
        None if matches_one => Some(WeightConvention::Proportional),
        None if matches_weight => Some(WeightConvention::Absolute),
        None => None,
    };

    let metrics = match convention {
        Some(WeightConvention::Proportional) => MetricWeights::Proportional(spec.metrics),
        Some(WeightConvention::Absolute) => MetricWeights::Absolute(spec.metrics),
        None => {
            return Err(ConfigError::MetricWeightsMismatch {
                position,
                category: spec.name,
                sum,
                weight: spec.weight,
            });
        }
    };
    log::debug!(
        "{position}/{}: {:?} metric weights",
        spec.name,
        metrics.convention()
    );

    Ok(Category {
        name: spec.name,
        weight: spec.weight,
        kind: spec.kind,
        metrics,
    })
}

/// Position code to scoring configuration.
#[derive(Debug, Clone, Default)]
pub struct ScoringRegistry {
    positions: HashMap<PositionCode, PositionScoringConfig>,
}

impl ScoringRegistry {
    pub fn from_spec(spec: RegistrySpec) -> Result<Self, ConfigError> {
        let mut positions = HashMap::with_capacity(spec.positions.len());
        for item in spec.positions {
            let config = PositionScoringConfig::from_spec(item)?;
            let position = config.position;
            if positions.insert(position, config).is_some() {
                return Err(ConfigError::DuplicatePosition(position));
            }
        }
        Ok(Self { positions })
    }

    pub fn insert(&mut self, config: PositionScoringConfig) -> Option<PositionScoringConfig> {
        self.positions.insert(config.position, config)
    }

    pub fn get(&self, position: PositionCode) -> Option<&PositionScoringConfig> {
        self.positions.get(&position)
    }

    pub fn positions(&self) -> Vec<PositionCode> {
        let mut out: Vec<PositionCode> = self.positions.keys().copied().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySpec {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub positions: Vec<PositionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSpec {
    pub position: PositionCode,
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub kind: CategoryKind,
    #[serde(default)]
    pub convention: Option<WeightConvention>,
    pub metrics: Vec<MetricWeight>,
}

pub fn parse_scoring_registry(raw: &str) -> Result<ScoringRegistry> {
    let spec = serde_json::from_str::<RegistrySpec>(raw).context("parse scoring weights")?;
    let registry = ScoringRegistry::from_spec(spec).context("validate scoring weights")?;
    Ok(registry)
}

pub fn load_scoring_registry(path: &Path) -> Result<ScoringRegistry> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read scoring weights {}", path.display()))?;
    let registry = parse_scoring_registry(&raw)
        .with_context(|| format!("load scoring weights {}", path.display()))?;
    log::info!(
        "loaded scoring weights for {} positions from {}",
        registry.len(),
        path.display()
    );
    Ok(registry)
}

/// Built-in weights for CB, LB, RB, 6, 8, 10, LW/RW, CF and GK.
pub fn reference_registry() -> Result<&'static ScoringRegistry> {
    REFERENCE_REGISTRY.get_or_try_init(|| {
        parse_scoring_registry(include_str!("../assets/position_weights_v1.json"))
            .context("built-in scoring weights")
    })
}
