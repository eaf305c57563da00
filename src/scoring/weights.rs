use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ScoringError;

/// Caller-supplied relative importance per metric.
///
/// Weights are raw slider values and need not sum to 1; the scorer normalizes
/// them. An explicit zero keeps a metric out of the score.
///
/// Example YAML:
/// ```yaml
/// "GDP ($B)": 40
/// "Healthcare Expenditure (%)": 30
/// "Skilled Workforce (1-10)": 30
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same weight for every metric.
    pub fn uniform<I, S>(metrics: I, weight: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        metrics.into_iter().map(|m| (m.into(), weight)).collect()
    }

    pub fn with(mut self, metric: impl Into<String>, weight: f64) -> Self {
        self.set(metric, weight);
        self
    }

    pub fn set(&mut self, metric: impl Into<String>, weight: f64) {
        self.0.insert(metric.into(), weight);
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the keys against `metrics` and scale the weights to sum to 1.
    pub fn normalize(&self, metrics: &[String]) -> Result<NormalizedWeights, ScoringError> {
        let missing: Vec<String> = metrics
            .iter()
            .filter(|m| !self.0.contains_key(*m))
            .cloned()
            .collect();
        let unknown: Vec<String> = self
            .0
            .keys()
            .filter(|k| !metrics.contains(k))
            .cloned()
            .collect();
        if !missing.is_empty() || !unknown.is_empty() {
            return Err(ScoringError::SchemaMismatch { missing, unknown });
        }

        let mut largest: f64 = 0.0;
        for metric in metrics {
            let weight = self.0[metric];
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringError::InvalidWeight {
                    metric: metric.clone(),
                    value: weight,
                });
            }
            largest = largest.max(weight);
        }
        if largest == 0.0 {
            return Err(ScoringError::DegenerateWeights);
        }

        // Scale by the largest weight first so the sum cannot overflow.
        let total: f64 = metrics.iter().map(|m| self.0[m] / largest).sum();

        Ok(NormalizedWeights(
            metrics
                .iter()
                .map(|m| (m.clone(), self.0[m] / largest / total))
                .collect(),
        ))
    }
}

impl FromIterator<(String, f64)> for WeightVector {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Weights scaled to sum to 1, in scoring-metric order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedWeights(Vec<(String, f64)>);

impl NormalizedWeights {
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.iter().find(|(m, _)| m == metric).map(|(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(m, w)| (m.as_str(), *w))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().map(|(_, w)| w).sum()
    }
}
