//! Relationship type vocabulary.

use crate::models::SimilarityAnalysis;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of edge between two items.
///
/// Built-in kinds have their own strength formula; any other configured type
/// name becomes [`RelationshipKind::Custom`] and is scored by the overall
/// similarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipKind {
    SemanticSimilarity,
    TagOverlap,
    Complementary,
    Alternative,
    Dependency,
    Custom(String),
}

impl RelationshipKind {
    /// Configuration name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SemanticSimilarity => "semantic_similarity",
            Self::TagOverlap => "tag_overlap",
            Self::Complementary => "complementary",
            Self::Alternative => "alternative",
            Self::Dependency => "dependency",
            Self::Custom(name) => name,
        }
    }

    /// Base strength before the type weight is applied.
    pub fn strength(&self, similarity: &SimilarityAnalysis) -> f64 {
        let overall = similarity.overall_similarity;
        match self {
            Self::SemanticSimilarity => overall,
            Self::TagOverlap => similarity.tag_overlap_score,
            // related, but not too similar
            Self::Complementary => overall * (1.0 - overall) * 2.0,
            Self::Alternative => {
                if overall > 0.8 {
                    overall
                } else {
                    0.0
                }
            }
            Self::Dependency => similarity.content_similarity * 0.8,
            Self::Custom(_) => overall,
        }
    }

    /// Human-readable name: underscores become spaces and every word is
    /// capitalized, e.g. `"Semantic Similarity"`.
    pub fn title(&self) -> String {
        let mut title = String::with_capacity(self.as_str().len());
        let mut previous_cased = false;
        for c in self.as_str().chars() {
            let c = if c == '_' { ' ' } else { c };
            if c.is_alphabetic() {
                if previous_cased {
                    title.extend(c.to_lowercase());
                } else {
                    title.extend(c.to_uppercase());
                }
                previous_cased = true;
            } else {
                title.push(c);
                previous_cased = false;
            }
        }
        title
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RelationshipKind {
    fn from(name: &str) -> Self {
        match name {
            "semantic_similarity" => Self::SemanticSimilarity,
            "tag_overlap" => Self::TagOverlap,
            "complementary" => Self::Complementary,
            "alternative" => Self::Alternative,
            "dependency" => Self::Dependency,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for RelationshipKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<RelationshipKind> for String {
    fn from(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
