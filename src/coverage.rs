//! Topical coverage and historical-performance scoring.
//!
//! Pure arithmetic over the caller-supplied entity list. "Historical" data
//! is whatever the caller passes (or a zeroed default) — nothing is
//! persisted between calls, and the name is kept for parity with the
//! dashboard panels that consume it.

use crate::models::{HistoricalData, SemanticEntity, TopicalCoverage};

/// Relationship count at which entity coverage saturates.
const RELATIONSHIP_SATURATION: f64 = 10.0;
/// Combined attribute/relationship/ngram count at which depth saturates.
const DEPTH_SATURATION: f64 = 20.0;
/// Distinct entity kinds at which breadth saturates.
const BREADTH_SATURATION: f64 = 5.0;

/// Score how thoroughly `entities` covers `topic_id`.
pub fn score_topical_coverage(topic_id: &str, entities: &[SemanticEntity]) -> TopicalCoverage {
    let relationship_count: usize = entities.iter().map(|e| e.relationships.len()).sum();
    let depth_count: usize = entities
        .iter()
        .map(|e| e.attributes.len() + e.relationships.len() + e.ngrams.len())
        .sum();

    let mut kinds: Vec<&str> = entities.iter().map(|e| e.kind.as_str()).collect();
    kinds.sort_unstable();
    kinds.dedup();

    let entity_coverage = (relationship_count as f64 / RELATIONSHIP_SATURATION).min(1.0);
    let depth_score = (depth_count as f64 / DEPTH_SATURATION).min(1.0);
    let breadth_score = (kinds.len() as f64 / BREADTH_SATURATION).min(1.0);

    TopicalCoverage {
        topic_id: topic_id.to_string(),
        coverage_score: entity_coverage * depth_score,
        entity_coverage,
        depth_score,
        breadth_score,
    }
}

/// Blend coverage with weighted performance metrics into one authority
/// number in [0, 1]. With zeroed metrics this reduces to the coverage
/// score alone.
pub fn calculate_topical_authority(coverage: &TopicalCoverage, metrics: &HistoricalData) -> f64 {
    let performance = weighted_performance(metrics);
    (coverage.coverage_score * 0.7 + performance * 0.3).min(1.0)
}

/// Weighted combination of search metrics, each normalized into [0, 1].
fn weighted_performance(metrics: &HistoricalData) -> f64 {
    let ctr = metrics.click_through_rate.clamp(0.0, 1.0);
    // Positions past 20 contribute nothing; position 1 is full score.
    let position = if metrics.average_position > 0.0 {
        (1.0 - (metrics.average_position - 1.0) / 19.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let trend = ((metrics.trend + 1.0) / 2.0).clamp(0.0, 1.0);
    ctr * 0.4 + position * 0.4 + trend * 0.2
}
