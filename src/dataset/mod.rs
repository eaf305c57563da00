pub mod schema;
pub mod table;
pub mod types;

pub use schema::{Bounds, GeoFields, MetricSpec, MissingValues, Schema};
pub use table::{Cell, Numeric, RawTable};
pub use types::{Coordinates, Dataset, DatasetError, Entity};
