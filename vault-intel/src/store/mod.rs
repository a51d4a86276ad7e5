//! Injectable state for the scoring engine.
//!
//! Scoring itself is pure. Everything that outlives a single call, such as
//! the categorization history, learning records, discovered relationships,
//! the similarity cache and the discovery counters, lives behind the traits
//! in this module and is passed explicitly to the operations that need it.

pub mod cache;
pub mod memory;

pub use cache::{SimilarityCache, SimilarityKey};
pub use memory::{InMemoryStore, NoopStore};

use crate::features::FeatureBag;
use crate::models::{CategorizationResult, RelationshipResult, SimilarityAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Features and confidence of an item that was assigned a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningRecord {
    pub features: FeatureBag,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// Cumulative relationship discovery counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscoveryMetrics {
    /// Candidate targets that were compared against a source
    pub total_comparisons: u64,
    /// Edges retained after validation
    pub relationships_discovered: u64,
    /// Similarity analyses served from the cache
    pub cache_hits: u64,
    pub processing_time_total_ms: f64,
}

impl DiscoveryMetrics {
    /// Add another set of counters to this one.
    pub fn accumulate(&mut self, delta: &DiscoveryMetrics) {
        self.total_comparisons += delta.total_comparisons;
        self.relationships_discovered += delta.relationships_discovered;
        self.cache_hits += delta.cache_hits;
        self.processing_time_total_ms += delta.processing_time_total_ms;
    }
}

/// Storage for categorization history and learning records.
#[cfg_attr(test, mockall::automock)]
pub trait CategorizationStore {
    /// Append a result to the bounded history and record learning data for
    /// each assigned category.
    fn record_categorization(&mut self, result: &CategorizationResult, features: &FeatureBag);

    /// History, oldest first.
    fn history(&self) -> Vec<CategorizationResult>;

    /// Learning records of a category, oldest first.
    fn learning_records(&self, category: &str) -> Vec<LearningRecord>;
}

/// Storage for discovered relationships, cached similarities and discovery
/// counters.
pub trait RelationshipStore {
    /// Merge edges into the list stored under `source_key`.
    ///
    /// An incoming edge replaces a stored edge between the same items with
    /// the same type. The merged list is ordered by strength, strongest
    /// first, and truncated to `limit`.
    fn merge_relationships(
        &mut self,
        source_key: &str,
        relationships: Vec<RelationshipResult>,
        limit: usize,
    );

    /// Edges stored under a source key.
    fn relationships(&self, source_key: &str) -> Vec<RelationshipResult>;

    /// Mutable access to the edges stored under a source key.
    fn relationships_mut(&mut self, source_key: &str) -> Option<&mut Vec<RelationshipResult>>;

    /// Every stored edge, ordered by source key.
    fn all_relationships(&self) -> Vec<RelationshipResult>;

    fn cached_similarity(&mut self, key: &SimilarityKey) -> Option<SimilarityAnalysis>;

    fn cache_similarity(&mut self, key: SimilarityKey, analysis: SimilarityAnalysis);

    fn discovery_metrics(&self) -> DiscoveryMetrics;

    fn add_discovery_metrics(&mut self, delta: &DiscoveryMetrics);
}

/// A store usable by every operation of the engine.
pub trait IntelligenceStore: CategorizationStore + RelationshipStore {}

impl<T: CategorizationStore + RelationshipStore> IntelligenceStore for T {}
