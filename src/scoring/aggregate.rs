use std::collections::HashMap;
use tracing::debug;

use crate::dataset::{Dataset, Entity};

/// Collapse records that share an identifier into one, taking the arithmetic
/// mean of every metric.
///
/// Groups keep the position of their first record. Coordinates and extra
/// fields come from that first record too. Run this before [`score`], never
/// after: averaging normalized scores is a different transform.
///
/// [`score`]: super::score
pub fn aggregate_by_identifier(dataset: &Dataset) -> Dataset {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Entity>> = Vec::new();

    for entity in dataset.entities() {
        match index.get(entity.id.as_str()) {
            Some(&group) => groups[group].push(entity),
            None => {
                index.insert(entity.id.as_str(), groups.len());
                groups.push(vec![entity]);
            }
        }
    }

    let entities: Vec<Entity> = groups
        .into_iter()
        .map(|records| {
            let first = records[0];
            let mut merged = first.clone();
            let count = records.len() as f64;
            for metric in dataset.metrics() {
                // Divide before summing so large values cannot overflow.
                let mean: f64 = records
                    .iter()
                    .filter_map(|e| e.value(metric))
                    .map(|v| v / count)
                    .sum();
                merged.values.insert(metric.clone(), mean);
            }
            merged
        })
        .collect();

    debug!(
        records = dataset.len(),
        entities = entities.len(),
        "aggregated records by identifier"
    );

    Dataset::from_parts(
        dataset.metrics().to_vec(),
        dataset.scoring_metrics().to_vec(),
        entities,
    )
}
