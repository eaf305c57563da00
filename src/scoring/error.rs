#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// Every weight is zero, so the normalized weights are undefined.
    #[error("all weights are zero; give at least one metric a positive weight")]
    DegenerateWeights,

    #[error("{}", mismatch_message(.missing, .unknown))]
    SchemaMismatch {
        /// Scoring metrics without a weight
        missing: Vec<String>,
        /// Weights naming no scoring metric
        unknown: Vec<String>,
    },

    #[error("weight for '{metric}' must be a non-negative number, got {value}")]
    InvalidWeight { metric: String, value: f64 },
}

fn mismatch_message(missing: &[String], unknown: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("no weight for: {}", missing.join(", ")));
    }
    if !unknown.is_empty() {
        parts.push(format!("not a scoring metric: {}", unknown.join(", ")));
    }
    format!("weights do not match scoring metrics ({})", parts.join("; "))
}
