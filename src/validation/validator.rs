use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::error::{ValidationError, ValidationReport};
use crate::dataset::{
    Bounds, Cell, Coordinates, Dataset, Entity, GeoFields, MissingValues, Numeric, RawTable,
    Schema,
};

/// A numeric column the schema asks for.
struct NumericColumn<'a> {
    name: &'a str,
    bounds: Bounds,
    /// Whether the missing-value policy applies (metrics only, never coordinates)
    fillable: bool,
}

/// Validate a raw table against a schema and build a [`Dataset`] from it.
///
/// All checks run; the report carries every problem found, one per column
/// and check. The input table is never modified.
pub fn validate(table: &RawTable, schema: &Schema) -> Result<Dataset, ValidationReport> {
    let mut report = ValidationReport::default();

    // A schema naming a column twice cannot map columns to metrics.
    let duplicates = duplicate_columns(schema);
    if !duplicates.is_empty() {
        report.push(ValidationError::DuplicateColumns {
            columns: duplicates,
        });
        debug!("schema rejected");
        return Err(report);
    }

    let missing: Vec<String> = schema
        .required_columns()
        .into_iter()
        .filter(|name| table.column_index(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        report.push(ValidationError::Schema { missing });
    }

    let ids = table
        .column_index(&schema.identifier)
        .and_then(|col| read_identifiers(table, col, &schema.identifier, &mut report));

    let mut numeric = Vec::new();
    for metric in &schema.metrics {
        numeric.push(NumericColumn {
            name: &metric.name,
            bounds: metric.bounds(),
            fillable: true,
        });
    }
    if let Some(ref geo) = schema.geo {
        numeric.push(NumericColumn {
            name: &geo.latitude,
            bounds: GeoFields::LATITUDE,
            fillable: false,
        });
        numeric.push(NumericColumn {
            name: &geo.longitude,
            bounds: GeoFields::LONGITUDE,
            fillable: false,
        });
    }

    let mut columns: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for column in &numeric {
        let Some(index) = table.column_index(column.name) else {
            continue;
        };
        let policy = if column.fillable {
            schema.missing_values
        } else {
            MissingValues::Reject
        };
        match coerce_column(table, index, column.name, policy) {
            Ok(values) => {
                if let Some(error) = check_range(column.name, column.bounds, &values) {
                    report.push(error);
                }
                columns.insert(column.name, values);
            }
            Err(error) => report.push(error),
        }
    }

    if !report.is_empty() {
        report.sort();
        debug!(errors = report.errors().len(), "dataset rejected");
        return Err(report);
    }

    // Every required column is present and valid past this point.
    let ids = ids.unwrap_or_default();
    let known: Vec<&str> = schema.required_columns();
    let extra_columns: Vec<(usize, &String)> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(i, name)| !known.contains(&name.as_str()) && table.column_index(name) == Some(*i))
        .collect();

    let entities = ids
        .into_iter()
        .enumerate()
        .map(|(row, id)| {
            let mut entity = Entity::new(id);
            for metric in &schema.metrics {
                if let Some(values) = columns.get(metric.name.as_str()) {
                    entity.values.insert(metric.name.clone(), values[row]);
                }
            }
            if let Some(ref geo) = schema.geo {
                if let (Some(lat), Some(lon)) = (
                    columns.get(geo.latitude.as_str()),
                    columns.get(geo.longitude.as_str()),
                ) {
                    entity.coordinates = Some(Coordinates {
                        latitude: lat[row],
                        longitude: lon[row],
                    });
                }
            }
            for (index, name) in &extra_columns {
                entity
                    .extra
                    .insert((*name).clone(), table.cell(row, *index).clone());
            }
            entity
        })
        .collect();

    debug!(
        rows = table.len(),
        metrics = schema.metrics.len(),
        passthrough = extra_columns.len(),
        "dataset validated"
    );

    Ok(Dataset::from_parts(
        schema.metric_names(),
        schema.scoring_metric_names(),
        entities,
    ))
}

fn duplicate_columns(schema: &Schema) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for name in schema.required_columns() {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

fn read_identifiers(
    table: &RawTable,
    col: usize,
    name: &str,
    report: &mut ValidationReport,
) -> Option<Vec<String>> {
    let mut ids = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let cell = table.cell(row, col);
        if cell.is_blank() {
            report.push(ValidationError::EmptyIdentifier {
                column: name.to_string(),
                row,
            });
            return None;
        }
        ids.push(cell.to_string().trim().to_string());
    }
    Some(ids)
}

/// Coerce one column to numbers, reporting the first offending cell.
fn coerce_column(
    table: &RawTable,
    col: usize,
    name: &str,
    policy: MissingValues,
) -> Result<Vec<f64>, ValidationError> {
    let mut values = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let cell = table.cell(row, col);
        match (cell.to_numeric(), policy) {
            (Numeric::Value(n), _) => values.push(n),
            (Numeric::Missing, MissingValues::FillZero) => {
                debug!(column = name, row, "filling missing value with 0");
                values.push(0.0);
            }
            (Numeric::Missing, MissingValues::Reject) | (Numeric::Invalid, _) => {
                return Err(ValidationError::Type {
                    column: name.to_string(),
                    row,
                    value: describe(cell),
                });
            }
        }
    }
    Ok(values)
}

fn describe(cell: &Cell) -> String {
    if cell.is_blank() {
        "<empty>".to_string()
    } else {
        cell.to_string()
    }
}

/// One error per column: the value farthest outside the bounds, plus a count.
fn check_range(name: &str, bounds: Bounds, values: &[f64]) -> Option<ValidationError> {
    if !bounds.is_bounded() {
        return None;
    }
    let mut worst: Option<(f64, f64)> = None;
    let mut count = 0;
    for &value in values {
        let excess = bounds.excess(value);
        if excess > 0.0 {
            count += 1;
            if worst.map_or(true, |(_, e)| excess > e) {
                worst = Some((value, excess));
            }
        }
    }
    worst.map(|(value, _)| ValidationError::Range {
        column: name.to_string(),
        bounds,
        worst: value,
        count,
    })
}
