use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raw cell as handed over by a loader.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

/// Result of reading a cell as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    Missing,
    Invalid,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Coerce to a finite number. Numeric text is parsed after trimming,
    /// blank text counts as missing.
    pub fn to_numeric(&self) -> Numeric {
        match self {
            Cell::Number(n) if n.is_finite() => Numeric::Value(*n),
            Cell::Number(_) => Numeric::Invalid,
            Cell::Empty => Numeric::Missing,
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Numeric::Missing;
                }
                match s.parse::<f64>() {
                    Ok(n) if n.is_finite() => Numeric::Value(n),
                    _ => Numeric::Invalid,
                }
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

static EMPTY: Cell = Cell::Empty;

/// Tabular input with named columns, before validation.
///
/// Example YAML:
/// ```yaml
/// columns: [Location, "GDP ($B)", Latitude, Longitude]
/// rows:
///   - ["Location A", 2500, 40.7128, -74.0060]
///   - ["Location B", 1800, 34.0522, -118.2437]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column). Short rows read as empty past their end.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
