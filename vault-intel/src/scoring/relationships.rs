//! Relationship strength and confidence scoring.

use super::{Result, clamp_unit, ensure_finite};
use crate::config::{RelationshipConfig, RelationshipTypeConfig};
use crate::models::SimilarityAnalysis;
use crate::relationships::RelationshipKind;
use std::collections::BTreeMap;

/// Semantic similarity above which, together with strong tag overlap, the
/// confidence gets the multiple-indicator bonus.
const STRONG_SEMANTIC: f64 = 0.7;
const STRONG_TAG_OVERLAP: f64 = 0.5;
const MULTIPLE_INDICATOR_BONUS: f64 = 0.1;

/// More shared elements than this earn the shared-element bonus.
const SHARED_ELEMENT_MINIMUM: usize = 3;
const SHARED_ELEMENT_BONUS: f64 = 0.05;

/// A relationship type that met its threshold for one item pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRelationship {
    pub kind: RelationshipKind,
    pub strength: f64,
    pub confidence: f64,
    pub bidirectional: bool,
}

/// Scores relationship types against a similarity analysis.
#[derive(Debug, Clone, Default)]
pub struct RelationshipScorer {
    types: BTreeMap<String, RelationshipTypeConfig>,
}

impl RelationshipScorer {
    pub fn new(config: &RelationshipConfig) -> Self {
        Self {
            types: config.relationship_types.clone(),
        }
    }

    /// Settings of a type, defaults when unconfigured.
    pub fn type_config(&self, kind: &RelationshipKind) -> RelationshipTypeConfig {
        self.types.get(kind.as_str()).cloned().unwrap_or_default()
    }

    /// Weighted strength of a type, in `[0, 1]`.
    pub fn strength(&self, kind: &RelationshipKind, similarity: &SimilarityAnalysis) -> Result<f64> {
        let weight = self.type_config(kind).weight;
        let strength = ensure_finite(kind.strength(similarity) * weight, kind.as_str(), "strength")?;
        Ok(clamp_unit(strength))
    }

    /// Score a type; `None` when its strength is below the type threshold.
    pub fn score(
        &self,
        kind: &RelationshipKind,
        similarity: &SimilarityAnalysis,
    ) -> Result<Option<ScoredRelationship>> {
        let settings = self.type_config(kind);
        let strength = self.strength(kind, similarity)?;

        if strength < settings.threshold {
            return Ok(None);
        }

        Ok(Some(ScoredRelationship {
            kind: kind.clone(),
            strength,
            confidence: confidence_level(strength, similarity),
            bidirectional: settings.bidirectional,
        }))
    }
}

/// Confidence of an edge: its strength plus bonuses for corroborating evidence.
pub fn confidence_level(strength: f64, similarity: &SimilarityAnalysis) -> f64 {
    let mut confidence = strength;

    if similarity.semantic_similarity > STRONG_SEMANTIC
        && similarity.tag_overlap_score > STRONG_TAG_OVERLAP
    {
        confidence += MULTIPLE_INDICATOR_BONUS;
    }

    if similarity.shared_elements.count() > SHARED_ELEMENT_MINIMUM {
        confidence += SHARED_ELEMENT_BONUS;
    }

    clamp_unit(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::models::SharedElements;

    fn scorer() -> RelationshipScorer {
        let config = ConfigBuilder::new()
            .with_relationship_type(
                "dependency",
                RelationshipTypeConfig {
                    threshold: 0.3,
                    weight: 2.0,
                    bidirectional: false,
                },
            )
            .build()
            .unwrap();
        RelationshipScorer::new(&config.relationships)
    }

    #[test]
    fn test_weight_and_clamp() {
        let similarity = SimilarityAnalysis {
            content_similarity: 0.9,
            ..Default::default()
        };
        let strength = scorer()
            .strength(&RelationshipKind::Dependency, &similarity)
            .unwrap();
        assert_eq!(strength, 1.0);
    }

    #[test]
    fn test_threshold() {
        let similarity = SimilarityAnalysis {
            overall_similarity: 0.69,
            content_similarity: 0.25,
            ..Default::default()
        };
        let scorer = scorer();

        // default threshold 0.7
        assert!(
            scorer
                .score(&RelationshipKind::SemanticSimilarity, &similarity)
                .unwrap()
                .is_none()
        );

        let dependency = scorer
            .score(&RelationshipKind::Dependency, &similarity)
            .unwrap()
            .unwrap();
        assert!((dependency.strength - 0.4).abs() < 1e-9);
        assert!(!dependency.bidirectional);
    }

    #[test]
    fn test_confidence_bonuses() {
        let mut similarity = SimilarityAnalysis {
            semantic_similarity: 0.8,
            tag_overlap_score: 0.6,
            ..Default::default()
        };
        assert!((confidence_level(0.7, &similarity) - 0.8).abs() < 1e-9);

        similarity.shared_elements = SharedElements {
            tags: vec!["a".into(), "b".into()],
            words: vec!["c".into(), "d".into()],
            url_domain: None,
        };
        assert!((confidence_level(0.7, &similarity) - 0.85).abs() < 1e-9);
        assert_eq!(confidence_level(0.99, &similarity), 1.0);
    }

    #[test]
    fn test_non_finite_strength_is_an_error() {
        let similarity = SimilarityAnalysis {
            overall_similarity: f64::NAN,
            ..Default::default()
        };
        assert!(
            scorer()
                .strength(&RelationshipKind::SemanticSimilarity, &similarity)
                .is_err()
        );
    }
}
