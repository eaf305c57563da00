use serde::Serialize;

use super::engine::{ScoredDataset, ScoredEntity};
use super::normalize::MetricRange;

/// Maps the realized RAI range onto [0, 100] for display.
///
/// Purely cosmetic: the canonical [0, 1] RAI is what gets compared or
/// exported, and display values are never normalized again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    range: Option<MetricRange>,
}

impl DisplayScale {
    pub fn apply(&self, rai: f64) -> f64 {
        match self.range {
            // Fewer than two distinct scores: nothing to spread, show 0.
            Some(range) => range.normalize(rai) * 100.0,
            None => 0.0,
        }
    }
}

/// Position of one entity in a ranking (1-based).
#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub scored: &'a ScoredEntity,
}

/// Read-only view of a scored dataset ordered by descending RAI.
/// Equal scores keep their input order.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    order: Vec<&'a ScoredEntity>,
}

impl<'a> Ranking<'a> {
    pub fn iter(&self) -> impl Iterator<Item = RankedEntry<'a>> + '_ {
        self.order
            .iter()
            .enumerate()
            .map(|(i, scored)| RankedEntry {
                rank: i + 1,
                scored: *scored,
            })
    }

    /// The first `n` entries (all of them when `n` exceeds the length).
    pub fn top(&self, n: usize) -> Ranking<'a> {
        Ranking {
            order: self.order.iter().take(n).copied().collect(),
        }
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.order.iter().copied().map(|e| e.id()).collect()
    }

    /// 1-based rank of an entity.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|e| e.id() == id).map(|i| i + 1)
    }

    pub fn first(&self) -> Option<&'a ScoredEntity> {
        self.order.first().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Headline numbers for a scored dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub top: String,
    pub highest: f64,
    pub lowest: f64,
    pub mean: f64,
    pub count: usize,
}

impl ScoredDataset {
    pub fn ranked(&self) -> Ranking<'_> {
        let mut order: Vec<&ScoredEntity> = self.entities().iter().collect();
        // sort_by is stable, so ties stay in input order
        order.sort_by(|a, b| b.rai.total_cmp(&a.rai));
        Ranking { order }
    }

    pub fn display_scale(&self) -> DisplayScale {
        let range = MetricRange::of(self.entities().iter().map(|e| e.rai))
            .filter(|r| !r.is_constant());
        DisplayScale { range }
    }

    /// Display values in input order.
    pub fn display_scores(&self) -> Vec<f64> {
        let scale = self.display_scale();
        self.entities().iter().map(|e| scale.apply(e.rai)).collect()
    }

    pub fn summary(&self) -> Option<Summary> {
        let ranking = self.ranked();
        let top = ranking.first()?;
        let count = self.len();
        let lowest = self
            .entities()
            .iter()
            .map(|e| e.rai)
            .fold(f64::INFINITY, f64::min);
        let mean = self.entities().iter().map(|e| e.rai).sum::<f64>() / count as f64;
        Some(Summary {
            top: top.id().to_string(),
            highest: top.rai,
            lowest,
            mean,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::{Dataset, Entity};
    use crate::scoring::{score, ScoredDataset, WeightVector};

    fn scored(values: &[(&str, f64)]) -> ScoredDataset {
        let entities = values
            .iter()
            .map(|(id, v)| Entity::new(*id).with_value("Score", *v))
            .collect();
        let data = Dataset::scoring_all(vec!["Score".to_string()], entities).unwrap();
        score(&data, &WeightVector::new().with("Score", 1.0)).unwrap()
    }

    #[test]
    fn test_ranked_descending() {
        let scored = scored(&[("entity1", 10.0), ("entity2", 0.0), ("entity3", 5.0)]);
        assert_eq!(
            scored.ranked().ids(),
            vec!["entity1", "entity3", "entity2"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let scored = scored(&[("first", 3.0), ("top", 9.0), ("second", 3.0), ("third", 3.0)]);
        assert_eq!(
            scored.ranked().ids(),
            vec!["top", "first", "second", "third"]
        );
    }

    #[test]
    fn test_rank_numbers_and_position() {
        let scored = scored(&[("a", 1.0), ("b", 2.0)]);
        let ranking = scored.ranked();
        let ranks: Vec<_> = ranking.iter().map(|e| (e.rank, e.scored.id())).collect();
        assert_eq!(ranks, vec![(1, "b"), (2, "a")]);
        assert_eq!(ranking.position("a"), Some(2));
        assert_eq!(ranking.position("zzz"), None);
    }

    #[test]
    fn test_top_n() {
        let scored = scored(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert_eq!(scored.ranked().top(2).ids(), vec!["c", "b"]);
        assert_eq!(scored.ranked().top(10).len(), 3);
    }

    #[test]
    fn test_display_scale_example() {
        let scored = scored(&[("entity1", 10.0), ("entity2", 0.0), ("entity3", 5.0)]);
        assert_eq!(scored.display_scores(), vec![100.0, 0.0, 50.0]);
    }

    #[test]
    fn test_display_scale_uses_realized_range() {
        // Two metrics, half weight each: realized RAI range is [0.25, 0.75]
        let entities = vec![
            Entity::new("a").with_value("x", 0.0).with_value("y", 2.0),
            Entity::new("b").with_value("x", 1.0).with_value("y", 1.0),
            Entity::new("c").with_value("x", 0.5).with_value("y", 0.0),
        ];
        let data =
            Dataset::scoring_all(vec!["x".to_string(), "y".to_string()], entities).unwrap();
        let scored = score(&data, &WeightVector::uniform(["x", "y"], 1.0)).unwrap();
        let display = scored.display_scores();
        assert_eq!(display, vec![50.0, 100.0, 0.0]);
        // canonical scores are untouched
        assert_eq!(scored.get("b").unwrap().rai, 0.75);
    }

    #[test]
    fn test_display_scale_all_equal() {
        let scored = scored(&[("a", 4.0), ("b", 4.0)]);
        assert_eq!(scored.display_scores(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_summary() {
        let scored = scored(&[("a", 0.0), ("b", 10.0), ("c", 5.0)]);
        let summary = scored.summary().unwrap();
        assert_eq!(summary.top, "b");
        assert_eq!(summary.highest, 1.0);
        assert_eq!(summary.lowest, 0.0);
        assert!((summary.mean - 0.5).abs() < 1e-12);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_summary_empty() {
        let scored = scored(&[]);
        assert!(scored.summary().is_none());
        assert!(scored.ranked().is_empty());
    }
}
