use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::{Cell, Coordinates};
use crate::scoring::{DisplayScale, Ranking, Summary};

/// One ranked entity as written by `--format json`.
#[derive(Debug, Serialize)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub id: &'a str,
    pub rai: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rai_display: Option<f64>,
    pub normalized: BTreeMap<&'a str, f64>,
    pub values: &'a BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: &'a BTreeMap<String, Cell>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a Summary>,
    entities: Vec<RankedRow<'a>>,
}

pub fn ranked_rows<'a>(ranking: &Ranking<'a>, scale: Option<&DisplayScale>) -> Vec<RankedRow<'a>> {
    ranking
        .iter()
        .map(|entry| {
            let scored = entry.scored;
            RankedRow {
                rank: entry.rank,
                id: scored.id(),
                rai: scored.rai,
                rai_display: scale.map(|s| s.apply(scored.rai)),
                normalized: scored
                    .breakdown
                    .iter()
                    .map(|c| (c.metric.as_str(), c.normalized))
                    .collect(),
                values: &scored.entity.values,
                coordinates: scored.entity.coordinates,
                extra: &scored.entity.extra,
            }
        })
        .collect()
}

/// Pretty-printed JSON report of a ranking, with optional headline numbers.
pub fn to_json(
    ranking: &Ranking,
    scale: Option<&DisplayScale>,
    summary: Option<&Summary>,
) -> serde_json::Result<String> {
    let report = Report {
        summary,
        entities: ranked_rows(ranking, scale),
    };
    serde_json::to_string_pretty(&report)
}
