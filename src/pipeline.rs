use tracing::debug;

use crate::dataset::{RawTable, Schema};
use crate::error::Error;
use crate::scoring::{aggregate_by_identifier, score, ScoredDataset, WeightVector};
use crate::validation::validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Average records sharing an identifier before scoring
    pub aggregate: bool,
}

/// Validate `table`, optionally aggregate it, and score it.
///
/// Any failure aborts the whole pass; nothing partial is returned.
pub fn evaluate(
    table: &RawTable,
    schema: &Schema,
    weights: &WeightVector,
    options: EvaluateOptions,
) -> Result<ScoredDataset, Error> {
    let dataset = validate(table, schema)?;
    let dataset = if options.aggregate {
        aggregate_by_identifier(&dataset)
    } else {
        dataset
    };
    let scored = score(&dataset, weights)?;
    debug!(entities = scored.len(), aggregate = options.aggregate, "evaluation complete");
    Ok(scored)
}
