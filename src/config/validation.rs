use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let schema = &config.schema;

    if schema.identifier.trim().is_empty() {
        errors.push("schema.identifier: must not be empty".to_string());
    }

    if schema.metrics.is_empty() {
        errors.push("schema.metrics: at least one metric is required".to_string());
    }

    // Column names must be unique across identifier, metrics and coordinates
    let mut seen = HashSet::new();
    seen.insert(schema.identifier.as_str());
    if let Some(ref geo) = schema.geo {
        if geo.latitude == geo.longitude {
            errors.push(format!(
                "schema.geo: latitude and longitude both use column '{}'",
                geo.latitude
            ));
        }
        seen.insert(geo.latitude.as_str());
        seen.insert(geo.longitude.as_str());
    }

    for (i, metric) in schema.metrics.iter().enumerate() {
        if metric.name.trim().is_empty() {
            errors.push(format!("schema.metrics[{}].name: must not be empty", i));
        } else if !seen.insert(metric.name.as_str()) {
            errors.push(format!(
                "schema.metrics[{}].name: duplicate column '{}'",
                i, metric.name
            ));
        }

        for (field, bound) in [("min", metric.min), ("max", metric.max)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    errors.push(format!(
                        "schema.metrics[{}].{}: must be a finite number",
                        i, field
                    ));
                }
            }
        }
        if let (Some(min), Some(max)) = (metric.min, metric.max) {
            if min > max {
                errors.push(format!(
                    "schema.metrics[{}]: min ({}) is greater than max ({})",
                    i, min, max
                ));
            }
        }
    }

    let scoring = schema.scoring_metric_names();
    if !schema.metrics.is_empty() && scoring.is_empty() {
        errors.push("schema.metrics: no metric has scoring enabled".to_string());
    }

    for (name, weight) in config.weights.iter() {
        if !scoring.iter().any(|m| m == name) {
            errors.push(format!("weights.{}: not a scoring metric", name));
        } else if !weight.is_finite() || weight < 0.0 {
            errors.push(format!(
                "weights.{}: must be a non-negative number, got {}",
                name, weight
            ));
        }
    }
    for metric in &scoring {
        if config.weights.get(metric).is_none() {
            errors.push(format!("weights.{}: missing (use 0 to exclude it)", metric));
        }
    }
    if !config.weights.is_empty() && config.weights.iter().all(|(_, w)| w == 0.0) {
        errors.push("weights: all weights are zero".to_string());
    }

    if config.top == Some(0) {
        errors.push("top: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{MetricSpec, Schema};
    use crate::scoring::WeightVector;

    fn config(metrics: Vec<MetricSpec>, weights: WeightVector) -> Config {
        Config {
            schema: Schema::new("Country", metrics),
            weights,
            display_scale: false,
            aggregate: false,
            top: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_valid_config() {
        let config = config(
            vec![MetricSpec::unbounded("GDP"), MetricSpec::bounded("Score", 0.0, 10.0)],
            WeightVector::new().with("GDP", 1.0).with("Score", 0.0),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_metrics() {
        let config = config(vec![], WeightVector::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("schema.metrics"));
    }

    #[test]
    fn test_duplicate_metric() {
        let config = config(
            vec![MetricSpec::unbounded("GDP"), MetricSpec::unbounded("GDP")],
            WeightVector::new().with("GDP", 1.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("schema.metrics[1].name"));
    }

    #[test]
    fn test_metric_named_like_identifier() {
        let config = config(
            vec![MetricSpec::unbounded("Country")],
            WeightVector::new().with("Country", 1.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("duplicate column 'Country'"));
    }

    #[test]
    fn test_inverted_bounds() {
        let config = config(
            vec![MetricSpec::bounded("Score", 10.0, 0.0)],
            WeightVector::new().with("Score", 1.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("min (10) is greater than max (0)"));
    }

    #[test]
    fn test_negative_weight() {
        let config = config(
            vec![MetricSpec::unbounded("GDP")],
            WeightVector::new().with("GDP", -5.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("weights.GDP"));
    }

    #[test]
    fn test_weight_for_unknown_or_informational_metric() {
        let config = config(
            vec![
                MetricSpec::unbounded("GDP"),
                MetricSpec::unbounded("Year").informational(),
            ],
            WeightVector::new()
                .with("GDP", 1.0)
                .with("Year", 1.0)
                .with("Area", 1.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "weights.Area: not a scoring metric".to_string(),
                "weights.Year: not a scoring metric".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_weight() {
        let config = config(
            vec![MetricSpec::unbounded("GDP"), MetricSpec::unbounded("Labor")],
            WeightVector::new().with("GDP", 1.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["weights.Labor: missing (use 0 to exclude it)".to_string()]);
    }

    #[test]
    fn test_all_zero_weights() {
        let config = config(
            vec![MetricSpec::unbounded("GDP")],
            WeightVector::new().with("GDP", 0.0),
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["weights: all weights are zero".to_string()]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = config(
            vec![MetricSpec::bounded("Score", 10.0, 0.0)], // Error 1
            WeightVector::new().with("Score", -1.0),       // Error 2
        );
        config.top = Some(0); // Error 3
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
