//! Feature-level analyzers shared by categorization and relationship discovery.
//!
//! - [`patterns`]: keyword pattern matching of one item against each category
//! - [`similarity`]: similarity measures between two items

pub mod patterns;
pub mod similarity;

pub use patterns::{PatternScore, SemanticPatternAnalyzer};
pub use similarity::{SimilarityAnalyzer, cosine_similarity, jaccard};
