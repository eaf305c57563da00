use serde::Serialize;
use std::collections::BTreeMap;

use super::table::Cell;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One candidate location after validation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Entity {
    pub id: String,
    /// Raw value for every metric in the schema
    pub values: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Columns the schema does not name, passed through untouched
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Cell>,
}

impl Entity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values: BTreeMap::new(),
            coordinates: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.values.insert(metric.into(), value);
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied()
    }
}

/// An ordered, validated collection of entities sharing one set of metrics.
///
/// Built by the validator (or directly in tests); never mutated once built.
/// Aggregation and scoring derive new values from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    metrics: Vec<String>,
    scoring_metrics: Vec<String>,
    entities: Vec<Entity>,
}

/// Why [`Dataset::new`] refused its input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("scoring metric '{0}' is not a dataset metric")]
    UnknownScoringMetric(String),

    #[error("entity '{entity}' has no value for metric '{metric}'")]
    MissingValue { entity: String, metric: String },

    #[error("entity '{entity}' has a non-finite value for '{field}'")]
    NonFinite { entity: String, field: String },
}

impl Dataset {
    /// Assemble a dataset. Every entity must carry a finite value for every
    /// metric, coordinates must be finite, and scoring metrics must be a
    /// subset of `metrics`.
    pub fn new(
        metrics: Vec<String>,
        scoring_metrics: Vec<String>,
        entities: Vec<Entity>,
    ) -> Result<Self, DatasetError> {
        if let Some(unknown) = scoring_metrics.iter().find(|m| !metrics.contains(m)) {
            return Err(DatasetError::UnknownScoringMetric(unknown.clone()));
        }
        for entity in &entities {
            for metric in &metrics {
                match entity.value(metric) {
                    None => {
                        return Err(DatasetError::MissingValue {
                            entity: entity.id.clone(),
                            metric: metric.clone(),
                        })
                    }
                    Some(v) if !v.is_finite() => {
                        return Err(DatasetError::NonFinite {
                            entity: entity.id.clone(),
                            field: metric.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
            if let Some(c) = entity.coordinates {
                if !c.latitude.is_finite() || !c.longitude.is_finite() {
                    return Err(DatasetError::NonFinite {
                        entity: entity.id.clone(),
                        field: "coordinates".to_string(),
                    });
                }
            }
        }
        Ok(Self {
            metrics,
            scoring_metrics,
            entities,
        })
    }

    /// Skip the consistency checks; callers guarantee them.
    pub(crate) fn from_parts(
        metrics: Vec<String>,
        scoring_metrics: Vec<String>,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            metrics,
            scoring_metrics,
            entities,
        }
    }

    /// All metrics are scoring metrics.
    pub fn scoring_all(
        metrics: Vec<String>,
        entities: Vec<Entity>,
    ) -> Result<Self, DatasetError> {
        Self::new(metrics.clone(), metrics, entities)
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn scoring_metrics(&self) -> &[String] {
        &self.scoring_metrics
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Raw values of one metric in entity order.
    pub fn column(&self, metric: &str) -> Vec<f64> {
        self.entities
            .iter()
            .filter_map(|e| e.value(metric))
            .collect()
    }

    /// True when at least two entities share an identifier.
    pub fn has_duplicate_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        !self.entities.iter().all(|e| seen.insert(e.id.as_str()))
    }
}
