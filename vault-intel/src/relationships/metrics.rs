//! Discovery statistics over the stored relationships.

use crate::models::RelationshipResult;
use crate::store::DiscoveryMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const VERY_STRONG: f64 = 0.8;
const STRONG: f64 = 0.7;
const MODERATE: f64 = 0.6;
const HIGH_CONFIDENCE: f64 = 0.8;

/// Snapshot of discovery performance and of the stored edge set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscoveryStatistics {
    pub discovery_summary: DiscoverySummary,
    pub relationship_type_distribution: BTreeMap<String, usize>,
    pub strength_distribution: StrengthDistribution,
    /// Edge counts keyed `"{source_database}-{target_database}"`
    pub database_pair_distribution: BTreeMap<String, usize>,
    pub quality_metrics: RelationshipQualityMetrics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscoverySummary {
    pub total_relationships: usize,
    pub total_comparisons: u64,
    /// Stored edges per hundred comparisons
    pub discovery_rate: f64,
    /// Cache hits per hundred comparisons
    pub cache_hit_rate: f64,
    /// Processing time per comparison
    pub average_processing_time_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StrengthDistribution {
    pub very_strong: usize,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipQualityMetrics {
    pub high_confidence_relationships: usize,
    pub bidirectional_relationships: usize,
    pub validated_relationships: usize,
}

impl StrengthDistribution {
    fn record(&mut self, strength: f64) {
        if strength >= VERY_STRONG {
            self.very_strong += 1;
        } else if strength >= STRONG {
            self.strong += 1;
        } else if strength >= MODERATE {
            self.moderate += 1;
        } else {
            self.weak += 1;
        }
    }
}

impl DiscoveryStatistics {
    pub fn new(relationships: &[RelationshipResult], metrics: &DiscoveryMetrics) -> Self {
        let total_relationships = relationships.len();
        let comparisons = metrics.total_comparisons.max(1) as f64;

        let mut statistics = DiscoveryStatistics {
            discovery_summary: DiscoverySummary {
                total_relationships,
                total_comparisons: metrics.total_comparisons,
                discovery_rate: total_relationships as f64 / comparisons * 100.0,
                cache_hit_rate: metrics.cache_hits as f64 / comparisons * 100.0,
                average_processing_time_ms: metrics.processing_time_total_ms / comparisons,
            },
            ..Default::default()
        };

        for relationship in relationships {
            *statistics
                .relationship_type_distribution
                .entry(relationship.relationship_type.clone())
                .or_default() += 1;

            statistics
                .strength_distribution
                .record(relationship.strength_score);

            *statistics
                .database_pair_distribution
                .entry(format!(
                    "{}-{}",
                    relationship.source_database, relationship.target_database
                ))
                .or_default() += 1;

            let quality = &mut statistics.quality_metrics;
            if relationship.confidence_level >= HIGH_CONFIDENCE {
                quality.high_confidence_relationships += 1;
            }
            if relationship.bidirectional {
                quality.bidirectional_relationships += 1;
            }
            if relationship.validation_passed {
                quality.validated_relationships += 1;
            }
        }

        statistics
    }
}
