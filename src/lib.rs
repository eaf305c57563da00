//! Relative Attractiveness Index: validate tabular metrics, min-max normalize
//! them and rank entities by a weighted composite score.

pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod validation;

pub use error::Error;
pub use pipeline::{evaluate, EvaluateOptions};
pub use scoring::{score, ScoredDataset, ScoringError, WeightVector};
pub use validation::{validate, ValidationReport};
