use crate::dataset::{Cell, MetricSpec, RawTable, Schema};

pub const GDP: &str = "GDP ($B)";
pub const HEALTHCARE: &str = "Healthcare Expenditure (%)";
pub const REGULATORY: &str = "Regulatory Score (1-10)";
pub const WORKFORCE: &str = "Skilled Workforce (1-10)";
pub const RESOURCES: &str = "Resource Availability (1-10)";
pub const STABILITY: &str = "Political Stability (1-10)";

/// Facility-siting schema: economic size, health spend and four 0-10 scores,
/// with coordinates for map rendering.
pub fn location_schema() -> Schema {
    Schema::new(
        "Location",
        vec![
            MetricSpec {
                min: Some(0.0),
                ..MetricSpec::unbounded(GDP)
            },
            MetricSpec::bounded(HEALTHCARE, 0.0, 100.0),
            MetricSpec::bounded(REGULATORY, 0.0, 10.0),
            MetricSpec::bounded(WORKFORCE, 0.0, 10.0),
            MetricSpec::bounded(RESOURCES, 0.0, 10.0),
            MetricSpec::bounded(STABILITY, 0.0, 10.0),
        ],
    )
    .with_geo("Latitude", "Longitude")
}

/// Five sample locations matching [`location_schema`].
pub fn demo_table() -> RawTable {
    let mut table = RawTable::new(
        [
            "Location", GDP, HEALTHCARE, REGULATORY, WORKFORCE, RESOURCES, STABILITY, "Latitude",
            "Longitude",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    );
    let rows: [(&str, [f64; 8]); 5] = [
        ("Location A", [2500.0, 9.5, 8.5, 9.0, 7.5, 8.0, 40.7128, -74.0060]),
        ("Location B", [1800.0, 7.2, 6.0, 8.5, 8.0, 7.0, 34.0522, -118.2437]),
        ("Location C", [3000.0, 10.0, 9.0, 8.5, 9.5, 9.0, 51.5074, -0.1278]),
        ("Location D", [1500.0, 6.8, 5.0, 7.0, 6.5, 6.5, 48.8566, 2.3522]),
        ("Location E", [4000.0, 12.0, 9.5, 9.5, 8.0, 9.5, 35.6895, 139.6917]),
    ];
    for (name, values) in rows {
        let mut row = vec![Cell::from(name)];
        row.extend(values.into_iter().map(Cell::from));
        table.push_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn test_demo_table_is_valid() {
        let dataset = validate(&demo_table(), &location_schema()).unwrap();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.entities()[4].value(HEALTHCARE), Some(12.0));
        assert!(dataset.entities()[2].coordinates.is_some());
    }
}
