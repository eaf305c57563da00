pub mod aggregate;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod ranking;
pub mod weights;

pub use aggregate::aggregate_by_identifier;
pub use engine::{score, MetricContribution, ScoredDataset, ScoredEntity};
pub use error::ScoringError;
pub use normalize::{min_max, MetricRange};
pub use ranking::{DisplayScale, RankedEntry, Ranking, Summary};
pub use weights::{NormalizedWeights, WeightVector};
