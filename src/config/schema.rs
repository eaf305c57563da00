use serde::{Deserialize, Serialize};

use super::presets;
use crate::dataset::Schema;
use crate::scoring::WeightVector;

/// Main configuration.
///
/// Example YAML:
/// ```yaml
/// schema:
///   identifier: Location
///   metrics:
///     - { name: "GDP ($B)", min: 0 }
///     - { name: "Regulatory Score (1-10)", min: 0, max: 10 }
///   geo: { latitude: Latitude, longitude: Longitude }
///   missing_values: reject
/// weights:
///   "GDP ($B)": 20
///   "Regulatory Score (1-10)": 20
/// display_scale: true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub schema: Schema,

    /// Raw weight per scoring metric (need not sum to 1)
    #[serde(default)]
    pub weights: WeightVector,

    /// Show RAI rescaled to 0-100 next to the canonical score
    #[serde(default)]
    pub display_scale: bool,

    /// Average records sharing an identifier before scoring
    #[serde(default)]
    pub aggregate: bool,

    /// Only show the best N entities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let schema = presets::location_schema();
        let weights = WeightVector::uniform(schema.scoring_metric_names(), 20.0);
        Self {
            schema,
            weights,
            display_scale: true,
            aggregate: false,
            top: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MissingValues;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema.identifier, "Location");
        assert_eq!(config.schema.scoring_metric_names().len(), 6);
        assert_eq!(config.weights.len(), 6);
        assert_eq!(config.weights.get("GDP ($B)"), Some(20.0));
        assert!(config.display_scale);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
schema:
  identifier: Country
  metrics:
    - name: GDP
    - name: Labor Force
weights:
  GDP: 40
  Labor Force: 60
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.schema.metrics.len(), 2);
        assert_eq!(config.schema.missing_values, MissingValues::Reject);
        assert_eq!(config.weights.get("Labor Force"), Some(60.0));
        assert!(!config.display_scale);
        assert!(!config.aggregate);
        assert!(config.top.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
schema:
  identifier: Country
  metrics: []
colour: blue
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
