use serde::Serialize;

/// Observed minimum and maximum of one column.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Range over `values`, or None when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| match range {
            None => Some(MetricRange { min: v, max: v }),
            Some(r) => Some(MetricRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// Every value in the column is the same.
    pub fn is_constant(&self) -> bool {
        self.max == self.min
    }

    /// Min-max scale `value` into [0, 1]. A constant column maps to 0.
    ///
    /// The result is only guaranteed to lie in [0, 1] for values inside the
    /// range, which holds for the column the range was taken from.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_constant() {
            return 0.0;
        }
        let span = self.max - self.min;
        if span.is_finite() {
            (value - self.min) / span
        } else {
            // Span overflows f64; halving every term keeps it finite.
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }
}

/// Min-max scale a whole column.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    match MetricRange::of(values.iter().copied()) {
        Some(range) => values.iter().map(|&v| range.normalize(v)).collect(),
        None => Vec::new(),
    }
}
