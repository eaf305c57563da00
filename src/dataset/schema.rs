use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive value domain for a metric. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.excess(value) == 0.0
    }

    /// Distance from `value` to the nearest bound it violates (0 when inside).
    pub fn excess(&self, value: f64) -> f64 {
        if let Some(min) = self.min {
            if value < min {
                return min - value;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return value - max;
            }
        }
        0.0
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "[{}, {}]", min, max),
            (Some(min), None) => write!(f, ">= {}", min),
            (None, Some(max)) => write!(f, "<= {}", max),
            (None, None) => write!(f, "unbounded"),
        }
    }
}

/// One metric column of a dataset.
///
/// Example YAML:
/// ```yaml
/// name: "Regulatory Score (1-10)"
/// min: 0
/// max: 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricSpec {
    pub name: String,

    /// Inclusive lower bound, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Inclusive upper bound, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Whether the metric takes part in the RAI (default: true).
    /// Non-scoring metrics are still validated and carried through.
    #[serde(default = "default_scoring")]
    pub scoring: bool,
}

fn default_scoring() -> bool {
    true
}

impl MetricSpec {
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
            scoring: true,
        }
    }

    pub fn bounded(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min: Some(min),
            max: Some(max),
            scoring: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.min,
            max: self.max,
        }
    }

    /// Keep the column validated but exclude it from scoring.
    pub fn informational(mut self) -> Self {
        self.scoring = false;
        self
    }
}

/// Column names holding coordinates for downstream map rendering.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeoFields {
    pub latitude: String,
    pub longitude: String,
}

impl GeoFields {
    pub const LATITUDE: Bounds = Bounds {
        min: Some(-90.0),
        max: Some(90.0),
    };
    pub const LONGITUDE: Bounds = Bounds {
        min: Some(-180.0),
        max: Some(180.0),
    };
}

/// What to do with empty metric cells.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingValues {
    /// Empty cells are a type error.
    #[default]
    Reject,
    /// Empty cells become 0.0 before normalization. This ranks an entity with
    /// missing data as if it had the lowest possible value, so it must be
    /// asked for explicitly.
    FillZero,
}

/// Columns a dataset must carry, and how to read them.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Column holding the entity name or code.
    pub identifier: String,

    pub metrics: Vec<MetricSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoFields>,

    #[serde(default)]
    pub missing_values: MissingValues,
}

impl Schema {
    pub fn new(identifier: impl Into<String>, metrics: Vec<MetricSpec>) -> Self {
        Self {
            identifier: identifier.into(),
            metrics,
            geo: None,
            missing_values: MissingValues::Reject,
        }
    }

    pub fn with_geo(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.geo = Some(GeoFields {
            latitude: latitude.into(),
            longitude: longitude.into(),
        });
        self
    }

    pub fn with_missing_values(mut self, policy: MissingValues) -> Self {
        self.missing_values = policy;
        self
    }

    /// Every column name the dataset must contain, in declaration order.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.identifier.as_str()];
        columns.extend(self.metrics.iter().map(|m| m.name.as_str()));
        if let Some(ref geo) = self.geo {
            columns.push(geo.latitude.as_str());
            columns.push(geo.longitude.as_str());
        }
        columns
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.name.clone()).collect()
    }

    pub fn scoring_metric_names(&self) -> Vec<String> {
        self.metrics
            .iter()
            .filter(|m| m.scoring)
            .map(|m| m.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_inclusive() {
        let bounds = Bounds::new(0.0, 10.0);
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.5));
        assert!(!bounds.contains(-0.1));
        assert_eq!(bounds.to_string(), "[0, 10]");
    }

    #[test]
    fn test_bounds_half_open() {
        let bounds = Bounds {
            min: Some(0.0),
            max: None,
        };
        assert!(bounds.contains(1e12));
        assert!(!bounds.contains(-1.0));
        assert_eq!(bounds.to_string(), ">= 0");
    }

    #[test]
    fn test_bounds_excess() {
        let bounds = Bounds::new(0.0, 10.0);
        assert_eq!(bounds.excess(5.0), 0.0);
        assert_eq!(bounds.excess(12.0), 2.0);
        assert_eq!(bounds.excess(-3.0), 3.0);
    }

    #[test]
    fn test_required_columns_include_geo() {
        let schema = Schema::new("Location", vec![MetricSpec::unbounded("GDP")])
            .with_geo("Latitude", "Longitude");
        assert_eq!(
            schema.required_columns(),
            vec!["Location", "GDP", "Latitude", "Longitude"]
        );
    }

    #[test]
    fn test_scoring_metric_names_skip_informational() {
        let schema = Schema::new(
            "Country",
            vec![
                MetricSpec::unbounded("GDP"),
                MetricSpec::unbounded("Year").informational(),
            ],
        );
        assert_eq!(schema.metric_names(), vec!["GDP", "Year"]);
        assert_eq!(schema.scoring_metric_names(), vec!["GDP"]);
    }

    #[test]
    fn test_metric_spec_parse() {
        let yaml = r#"
name: "Regulatory Score (1-10)"
min: 0
max: 10
"#;
        let spec: MetricSpec = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(spec.bounds(), Bounds::new(0.0, 10.0));
        assert!(spec.scoring);
    }

    #[test]
    fn test_schema_parse_defaults() {
        let yaml = r#"
identifier: Location
metrics:
  - name: GDP
"#;
        let schema: Schema = serde_saphyr::from_str(yaml).unwrap();
        assert!(schema.geo.is_none());
        assert_eq!(schema.missing_values, MissingValues::Reject);
        assert!(!schema.metrics[0].bounds().is_bounded());
    }

    #[test]
    fn test_missing_values_parse() {
        let yaml = r#"
identifier: Country
metrics: []
missing_values: fill_zero
"#;
        let schema: Schema = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(schema.missing_values, MissingValues::FillZero);
    }
}
