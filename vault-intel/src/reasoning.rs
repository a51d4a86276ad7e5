//! Human-readable justifications and near-miss alternatives.

use crate::models::{CategoryAnalysis, SimilarityAnalysis};
use crate::relationships::RelationshipKind;
use std::collections::BTreeMap;

/// Categories scoring above this are offered as alternatives.
pub const ALTERNATIVE_THRESHOLD: f64 = 0.4;

/// At most this many alternatives are offered.
pub const MAX_ALTERNATIVES: usize = 3;

/// One line per selected category:
/// `"{category}: {reasoning} (confidence: {confidence:.2})"`.
pub fn category_reasoning(
    analyses: &BTreeMap<String, CategoryAnalysis>,
    selected: &[String],
) -> Vec<String> {
    selected
        .iter()
        .filter_map(|category| analyses.get(category))
        .map(|analysis| {
            format!(
                "{}: {} (confidence: {:.2})",
                analysis.category, analysis.reasoning, analysis.confidence
            )
        })
        .collect()
}

/// Unselected categories above [`ALTERNATIVE_THRESHOLD`], strongest first,
/// ties by name.
pub fn alternative_categories(
    analyses: &BTreeMap<String, CategoryAnalysis>,
    selected: &[String],
) -> Vec<String> {
    let mut alternatives: Vec<&CategoryAnalysis> = analyses
        .values()
        .filter(|a| a.confidence > ALTERNATIVE_THRESHOLD && !selected.contains(&a.category))
        .collect();

    alternatives.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.category.cmp(&b.category))
    });

    alternatives
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .map(|a| a.category.clone())
        .collect()
}

/// Explain why an edge was discovered, e.g.
/// `"Tag Overlap: Shared tags: ai, python (strength: 0.75)"`.
pub fn discovery_reason(similarity: &SimilarityAnalysis, kind: &RelationshipKind, strength: f64) -> String {
    let mut reasons = Vec::new();

    if similarity.semantic_similarity > 0.7 {
        reasons.push(format!(
            "High semantic similarity ({:.2})",
            similarity.semantic_similarity
        ));
    }

    if similarity.tag_overlap_score > 0.5 {
        let shared: Vec<&str> = similarity
            .shared_elements
            .tags
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Shared tags: {}", shared.join(", ")));
    }

    if similarity.content_similarity > 0.6 {
        reasons.push(format!(
            "Similar content ({:.2})",
            similarity.content_similarity
        ));
    }

    if reasons.is_empty() {
        reasons.push(format!("Moderate {} indicators", kind));
    }

    format!(
        "{}: {} (strength: {:.2})",
        kind.title(),
        reasons.join("; "),
        strength
    )
}
