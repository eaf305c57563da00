use crate::scoring::ScoringError;
use crate::validation::ValidationReport;

/// Failure of a full validate-then-score pass.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
