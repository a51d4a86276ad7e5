//! Scoring results produced by categorization and relationship discovery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evidence behind a category confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StrengthFactors {
    /// Raw pattern score before weighting
    pub semantic_patterns: f64,
    /// Number of subcategory hits (double counted, see `CategoryAnalysis`)
    pub keyword_matches: usize,
    /// Number of matched pattern groups
    pub pattern_matches: usize,
    /// Confidence before clamping
    pub content_relevance: f64,
}

/// Scoring detail for one category of one item.
///
/// Ephemeral: produced per call and not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAnalysis {
    pub category: String,

    /// Confidence in `[0, 1]`
    pub confidence: f64,

    /// Subcategories that matched. A subcategory hit in both the tags and the
    /// text appears twice.
    pub keyword_matches: Vec<String>,

    /// Pattern groups with at least one keyword hit
    pub pattern_matches: Vec<String>,

    /// Reasoning parts joined by `"; "`
    pub reasoning: String,

    pub strength_factors: StrengthFactors,
}

/// Outcome of categorizing one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizationResult {
    pub item_id: String,
    pub database_id: String,

    /// Selected categories in descending confidence order
    pub assigned_categories: Vec<String>,

    /// Confidence of every assigned category
    pub confidence_scores: BTreeMap<String, f64>,

    /// One line per assigned category, or the error text for a failed call
    pub reasoning: Vec<String>,

    /// Near-miss categories, at most three, disjoint from the assigned ones
    pub alternative_categories: Vec<String>,

    /// Wall-clock time spent in the call
    pub processing_time_ms: f64,

    pub validation_passed: bool,

    /// Composite quality in `[0, 1]`, independent of `validation_passed`
    pub quality_score: f64,
}

impl CategorizationResult {
    /// Empty result returned when the pipeline fails for an item.
    pub fn failed(
        item_id: impl Into<String>,
        database_id: impl Into<String>,
        error: impl std::fmt::Display,
        processing_time_ms: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            database_id: database_id.into(),
            assigned_categories: Vec::new(),
            confidence_scores: BTreeMap::new(),
            reasoning: vec![format!("Error in categorization: {}", error)],
            alternative_categories: Vec::new(),
            processing_time_ms,
            validation_passed: false,
            quality_score: 0.0,
        }
    }

    /// Confidence of an assigned category, or 0 if it was not assigned.
    pub fn confidence(&self, category: &str) -> f64 {
        self.confidence_scores.get(category).copied().unwrap_or(0.0)
    }

    /// Whether the category was assigned.
    pub fn has_category(&self, category: &str) -> bool {
        self.assigned_categories.iter().any(|c| c == category)
    }
}

/// Elements two items have in common. Lists are sorted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedElements {
    pub tags: Vec<String>,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_domain: Option<String>,
}

impl SharedElements {
    /// Total number of shared elements across all kinds.
    pub fn count(&self) -> usize {
        self.tags.len() + self.words.len() + usize::from(self.url_domain.is_some())
    }
}

/// Similarity measures between two items, all in `[0, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarityAnalysis {
    /// Cosine of the vocabulary vectors
    pub semantic_similarity: f64,
    /// Jaccard index of the lower-cased tag sets
    pub tag_overlap_score: f64,
    /// Jaccard index of the title and description tokens
    pub content_similarity: f64,
    /// Closeness of description length and tag count
    pub structural_similarity: f64,
    /// Weighted combination of semantic, content and tag similarity
    pub overall_similarity: f64,
    pub shared_elements: SharedElements,
}

/// A discovered edge between items of two collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipResult {
    pub source_item_id: String,
    pub source_database: String,
    pub target_item_id: String,
    pub target_database: String,
    pub relationship_type: String,

    /// Strength in `[0, 1]`
    pub strength_score: f64,

    /// Confidence in `[0, 1]`
    pub confidence_level: f64,

    pub discovery_reason: String,
    pub bidirectional: bool,
    pub validation_passed: bool,
    pub created_timestamp: DateTime<Utc>,
}

impl RelationshipResult {
    /// Store key of the source item, `"{database}:{id}"`.
    pub fn source_key(&self) -> String {
        item_key(&self.source_database, &self.source_item_id)
    }

    /// Whether both edges connect the same items with the same type.
    pub fn same_edge(&self, other: &RelationshipResult) -> bool {
        self.source_database == other.source_database
            && self.source_item_id == other.source_item_id
            && self.target_database == other.target_database
            && self.target_item_id == other.target_item_id
            && self.relationship_type == other.relationship_type
    }
}

/// Key under which an item's relationships are stored.
pub fn item_key(database_id: &str, item_id: &str) -> String {
    format!("{}:{}", database_id, item_id)
}
