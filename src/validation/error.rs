use std::fmt;

use crate::dataset::Bounds;

/// Check that produced an error. Variants are ordered the way checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Schema,
    Type,
    Range,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Schema => "schema",
            Category::Type => "type",
            Category::Range => "range",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The schema itself names a column twice (metric, identifier or coordinate).
    #[error("schema declares columns more than once: {}", .columns.join(", "))]
    DuplicateColumns { columns: Vec<String> },

    /// `row` is zero-based; messages print it one-based.
    #[error("column '{column}' row {}: '{value}' is not a valid number", .row + 1)]
    Type {
        column: String,
        row: usize,
        value: String,
    },

    #[error("column '{column}' row {}: identifier is empty", .row + 1)]
    EmptyIdentifier { column: String, row: usize },

    #[error(
        "column '{column}' contains {count} value(s) outside range {bounds} (worst: {worst})"
    )]
    Range {
        column: String,
        bounds: Bounds,
        worst: f64,
        count: usize,
    },
}

impl ValidationError {
    pub fn category(&self) -> Category {
        match self {
            ValidationError::Schema { .. } | ValidationError::DuplicateColumns { .. } => {
                Category::Schema
            }
            ValidationError::Type { .. } | ValidationError::EmptyIdentifier { .. } => {
                Category::Type
            }
            ValidationError::Range { .. } => Category::Range,
        }
    }
}

/// Every problem found in one validation pass, ordered by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The first category of violation encountered.
    pub fn category(&self) -> Option<Category> {
        self.errors.first().map(ValidationError::category)
    }

    pub(crate) fn sort(&mut self) {
        // stable: keeps column order within a category
        self.errors.sort_by_key(ValidationError::category);
    }
}

impl From<Vec<ValidationError>> for ValidationReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        let mut report = Self { errors };
        report.sort();
        report
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            None => write!(f, "dataset is valid"),
            Some(category) => {
                write!(f, "{} error", category)?;
                for error in &self.errors {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message_lists_columns() {
        let err = ValidationError::Schema {
            missing: vec!["GDP ($B)".to_string(), "Latitude".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required columns: GDP ($B), Latitude"
        );
    }

    #[test]
    fn test_type_error_message_is_one_based() {
        let err = ValidationError::Type {
            column: "GDP".to_string(),
            row: 0,
            value: "n/a".to_string(),
        };
        assert_eq!(err.to_string(), "column 'GDP' row 1: 'n/a' is not a valid number");
    }

    #[test]
    fn test_range_error_message() {
        let err = ValidationError::Range {
            column: "Regulatory Score (1-10)".to_string(),
            bounds: Bounds::new(0.0, 10.0),
            worst: 12.5,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "column 'Regulatory Score (1-10)' contains 2 value(s) outside range [0, 10] (worst: 12.5)"
        );
    }

    #[test]
    fn test_report_orders_by_category() {
        let report = ValidationReport::from(vec![
            ValidationError::Range {
                column: "A".to_string(),
                bounds: Bounds::new(0.0, 1.0),
                worst: 2.0,
                count: 1,
            },
            ValidationError::Schema {
                missing: vec!["B".to_string()],
            },
        ]);
        assert_eq!(report.category(), Some(Category::Schema));
        assert_eq!(report.errors()[1].category(), Category::Range);
        assert!(report.to_string().starts_with("schema error\n  - missing"));
    }
}
