//! Bounded LRU cache of similarity analyses.

use crate::config::TextAnalysisWeights;
use crate::features::Fingerprint;
use crate::models::SimilarityAnalysis;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache key: the content fingerprints of both items plus the weights that
/// shaped the overall similarity.
///
/// Every similarity measure is symmetric, so the pair is stored in a
/// canonical order and `(a, b)` hits the entry written for `(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimilarityKey {
    first: Fingerprint,
    second: Fingerprint,
    weights: [u64; 3],
}

impl SimilarityKey {
    pub fn new(a: Fingerprint, b: Fingerprint, weights: &TextAnalysisWeights) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            weights: [
                weights.title_weight.to_bits(),
                weights.description_weight.to_bits(),
                weights.tags_weight.to_bits(),
            ],
        }
    }
}

/// LRU cache of similarity analyses; a capacity of 0 disables it.
#[derive(Debug)]
pub struct SimilarityCache {
    entries: Option<LruCache<SimilarityKey, SimilarityAnalysis>>,
}

impl SimilarityCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
        }
    }

    /// Look up an analysis, marking it as recently used.
    pub fn get(&mut self, key: &SimilarityKey) -> Option<SimilarityAnalysis> {
        self.entries.as_mut()?.get(key).cloned()
    }

    pub fn put(&mut self, key: SimilarityKey, analysis: SimilarityAnalysis) {
        if let Some(entries) = self.entries.as_mut() {
            entries.put(key, analysis);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }
}
