//! In-memory store implementations.

use super::{
    CategorizationStore, DiscoveryMetrics, LearningRecord, RelationshipStore, SimilarityCache,
    SimilarityKey,
};
use crate::config::StoreConfig;
use crate::features::FeatureBag;
use crate::models::{CategorizationResult, RelationshipResult, SimilarityAnalysis};
use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};
use tracing::trace;

/// Bounded in-memory store.
///
/// History and learning records evict oldest first once their limits are
/// reached. Relationship lists are capped by the limit passed to
/// [`RelationshipStore::merge_relationships`].
#[derive(Debug)]
pub struct InMemoryStore {
    history: VecDeque<CategorizationResult>,
    history_limit: usize,
    learning: BTreeMap<String, VecDeque<LearningRecord>>,
    learning_limit: usize,
    relationships: BTreeMap<String, Vec<RelationshipResult>>,
    similarity_cache: SimilarityCache,
    metrics: DiscoveryMetrics,
}

impl InMemoryStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            history: VecDeque::new(),
            history_limit: config.history_limit,
            learning: BTreeMap::new(),
            learning_limit: config.learning_records_per_category,
            relationships: BTreeMap::new(),
            similarity_cache: SimilarityCache::new(config.similarity_cache_size),
            metrics: DiscoveryMetrics::default(),
        }
    }

    /// Number of results in the history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of cached similarity analyses.
    pub fn cached_similarities(&self) -> usize {
        self.similarity_cache.len()
    }

    /// Drop all discovered relationships, cached similarities and counters.
    pub fn clear_relationships(&mut self) {
        self.relationships.clear();
        self.similarity_cache.clear();
        self.metrics = DiscoveryMetrics::default();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl CategorizationStore for InMemoryStore {
    fn record_categorization(&mut self, result: &CategorizationResult, features: &FeatureBag) {
        if self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(result.clone());

        if self.learning_limit == 0 {
            return;
        }

        let timestamp = Utc::now();
        for category in &result.assigned_categories {
            let records = self.learning.entry(category.clone()).or_default();
            if records.len() >= self.learning_limit {
                records.pop_front();
            }
            records.push_back(LearningRecord {
                features: features.clone(),
                confidence: result.confidence(category),
                timestamp,
            });
        }
    }

    fn history(&self) -> Vec<CategorizationResult> {
        self.history.iter().cloned().collect()
    }

    fn learning_records(&self, category: &str) -> Vec<LearningRecord> {
        self.learning
            .get(category)
            .map(|records| records.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl RelationshipStore for InMemoryStore {
    fn merge_relationships(
        &mut self,
        source_key: &str,
        relationships: Vec<RelationshipResult>,
        limit: usize,
    ) {
        let stored = self.relationships.entry(source_key.to_string()).or_default();

        for relationship in relationships {
            match stored.iter_mut().find(|r| r.same_edge(&relationship)) {
                Some(existing) => *existing = relationship,
                None => stored.push(relationship),
            }
        }

        stored.sort_by(|a, b| b.strength_score.total_cmp(&a.strength_score));
        stored.truncate(limit);

        trace!(source_key, stored = stored.len(), "Merged relationships");
    }

    fn relationships(&self, source_key: &str) -> Vec<RelationshipResult> {
        self.relationships
            .get(source_key)
            .cloned()
            .unwrap_or_default()
    }

    fn relationships_mut(&mut self, source_key: &str) -> Option<&mut Vec<RelationshipResult>> {
        self.relationships.get_mut(source_key)
    }

    fn all_relationships(&self) -> Vec<RelationshipResult> {
        self.relationships.values().flatten().cloned().collect()
    }

    fn cached_similarity(&mut self, key: &SimilarityKey) -> Option<SimilarityAnalysis> {
        self.similarity_cache.get(key)
    }

    fn cache_similarity(&mut self, key: SimilarityKey, analysis: SimilarityAnalysis) {
        self.similarity_cache.put(key, analysis);
    }

    fn discovery_metrics(&self) -> DiscoveryMetrics {
        self.metrics
    }

    fn add_discovery_metrics(&mut self, delta: &DiscoveryMetrics) {
        self.metrics.accumulate(delta);
    }
}

/// A store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl CategorizationStore for NoopStore {
    fn record_categorization(&mut self, _result: &CategorizationResult, _features: &FeatureBag) {}

    fn history(&self) -> Vec<CategorizationResult> {
        Vec::new()
    }

    fn learning_records(&self, _category: &str) -> Vec<LearningRecord> {
        Vec::new()
    }
}

impl RelationshipStore for NoopStore {
    fn merge_relationships(
        &mut self,
        _source_key: &str,
        _relationships: Vec<RelationshipResult>,
        _limit: usize,
    ) {
    }

    fn relationships(&self, _source_key: &str) -> Vec<RelationshipResult> {
        Vec::new()
    }

    fn relationships_mut(&mut self, _source_key: &str) -> Option<&mut Vec<RelationshipResult>> {
        None
    }

    fn all_relationships(&self) -> Vec<RelationshipResult> {
        Vec::new()
    }

    fn cached_similarity(&mut self, _key: &SimilarityKey) -> Option<SimilarityAnalysis> {
        None
    }

    fn cache_similarity(&mut self, _key: SimilarityKey, _analysis: SimilarityAnalysis) {}

    fn discovery_metrics(&self) -> DiscoveryMetrics {
        DiscoveryMetrics::default()
    }

    fn add_discovery_metrics(&mut self, _delta: &DiscoveryMetrics) {}
}
