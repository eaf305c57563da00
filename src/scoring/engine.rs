use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::error::ScoringError;
use super::normalize::MetricRange;
use super::weights::{NormalizedWeights, WeightVector};
use crate::dataset::{Dataset, Entity};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricContribution {
    pub metric: String,
    pub raw: f64,
    pub normalized: f64, // in [0, 1]
    pub weight: f64,     // normalized weight
    pub contribution: f64,
}

/// An entity with its normalized metrics and canonical RAI.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredEntity {
    #[serde(flatten)]
    pub entity: Entity,
    /// Canonical Relative Attractiveness Index in [0, 1]
    pub rai: f64,
    /// One entry per scoring metric, in scoring-metric order
    pub breakdown: Vec<MetricContribution>,
}

impl ScoredEntity {
    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn normalized(&self, metric: &str) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|c| c.metric == metric)
            .map(|c| c.normalized)
    }
}

/// Output of one scoring pass. Entities keep their input order; use
/// [`ScoredDataset::ranked`] for the ordered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDataset {
    metrics: Vec<String>,
    weights: NormalizedWeights,
    ranges: BTreeMap<String, MetricRange>,
    entities: Vec<ScoredEntity>,
}

impl ScoredDataset {
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn weights(&self) -> &NormalizedWeights {
        &self.weights
    }

    /// Observed range of a scoring metric (None for an empty dataset).
    pub fn range(&self, metric: &str) -> Option<MetricRange> {
        self.ranges.get(metric).copied()
    }

    pub fn entities(&self) -> &[ScoredEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScoredEntity> {
        self.entities.iter().find(|e| e.entity.id == id)
    }
}

/// Score every entity of `dataset` with `weights`.
///
/// 1. Weights are checked against the dataset's scoring metrics and scaled to
///    sum to 1.
/// 2. Each scoring metric is min-max normalized over all entities; a constant
///    column normalizes to 0.
/// 3. RAI is the weighted sum of the normalized values.
///
/// Pure: the dataset is only read, so concurrent calls with different weights
/// need no coordination.
pub fn score(dataset: &Dataset, weights: &WeightVector) -> Result<ScoredDataset, ScoringError> {
    let metrics = dataset.scoring_metrics().to_vec();
    let normalized_weights = weights.normalize(&metrics)?;

    let mut ranges = BTreeMap::new();
    for metric in &metrics {
        let values = dataset.entities().iter().filter_map(|e| e.value(metric));
        if let Some(range) = MetricRange::of(values) {
            if range.is_constant() && dataset.len() > 1 {
                warn!(
                    metric = metric.as_str(),
                    value = range.min,
                    "constant column contributes nothing to the ranking"
                );
            }
            debug!(
                metric = metric.as_str(),
                min = range.min,
                max = range.max,
                weight = normalized_weights.get(metric).unwrap_or(0.0),
                "metric range"
            );
            ranges.insert(metric.clone(), range);
        }
    }

    let entities = dataset
        .entities()
        .iter()
        .map(|entity| score_entity(entity, &normalized_weights, &ranges))
        .collect();

    debug!(
        entities = dataset.len(),
        metrics = metrics.len(),
        "scoring pass complete"
    );

    Ok(ScoredDataset {
        metrics,
        weights: normalized_weights,
        ranges,
        entities,
    })
}

fn score_entity(
    entity: &Entity,
    weights: &NormalizedWeights,
    ranges: &BTreeMap<String, MetricRange>,
) -> ScoredEntity {
    let breakdown: Vec<MetricContribution> = weights
        .iter()
        .map(|(metric, weight)| {
            // Datasets guarantee a value per metric; ranges exist whenever
            // there is at least one entity.
            let raw = entity.value(metric).unwrap_or(0.0);
            let normalized = ranges.get(metric).map_or(0.0, |r| r.normalize(raw));
            MetricContribution {
                metric: metric.to_string(),
                raw,
                normalized,
                weight,
                contribution: weight * normalized,
            }
        })
        .collect();

    // Clamp absorbs rounding in the weight sum.
    let rai = breakdown
        .iter()
        .map(|c| c.contribution)
        .sum::<f64>()
        .clamp(0.0, 1.0);

    ScoredEntity {
        entity: entity.clone(),
        rai,
        breakdown,
    }
}
