//! Multi-factor scoring.
//!
//! [`CategoryScorer`] turns pattern and subcategory evidence into a confidence
//! per category; [`RelationshipScorer`] turns a similarity analysis into a
//! strength and confidence per relationship type. Every surfaced value is
//! clamped to `[0, 1]`.

pub mod categories;
pub mod relationships;

pub use categories::CategoryScorer;
pub use relationships::{RelationshipScorer, ScoredRelationship};

/// Errors raised inside a single scoring pipeline.
///
/// These never escape the public `categorize` / `discover_relationships`
/// calls; they are turned into degraded results there.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// The collection id was empty
    #[error("collection id must not be empty")]
    EmptyDatabaseId,

    /// A computed value was NaN or infinite
    #[error("non-finite {measure} for '{subject}'")]
    NonFiniteScore {
        subject: String,
        measure: &'static str,
    },
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Clamp a score to `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Reject NaN and infinities before they are clamped into plausible values.
pub(crate) fn ensure_finite(value: f64, subject: &str, measure: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFiniteScore {
            subject: subject.to_string(),
            measure,
        })
    }
}

/// Reject empty collection ids.
pub(crate) fn ensure_database_id(database_id: &str) -> Result<()> {
    if database_id.trim().is_empty() {
        Err(ScoringError::EmptyDatabaseId)
    } else {
        Ok(())
    }
}
