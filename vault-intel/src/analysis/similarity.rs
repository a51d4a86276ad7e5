//! Pairwise similarity between two feature bags.

use crate::config::TextAnalysisWeights;
use crate::features::FeatureBag;
use crate::models::{SharedElements, SimilarityAnalysis};
use std::collections::BTreeSet;

/// Computes [`SimilarityAnalysis`] values with configurable overall weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityAnalyzer {
    weights: TextAnalysisWeights,
}

impl SimilarityAnalyzer {
    pub fn new(weights: TextAnalysisWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> TextAnalysisWeights {
        self.weights
    }

    /// Compare two items.
    ///
    /// Tag overlap, content similarity and structural similarity are symmetric;
    /// `shared_elements` is sorted and only explains the scores.
    pub fn analyze(&self, source: &FeatureBag, target: &FeatureBag) -> SimilarityAnalysis {
        let semantic_similarity = cosine_similarity(
            source.semantic_vector.as_slice(),
            target.semantic_vector.as_slice(),
        );

        let tag_overlap_score = jaccard(&source.tag_set, &target.tag_set);

        let source_words = source.word_set();
        let target_words = target.word_set();
        let content_similarity = jaccard(&source_words, &target_words);

        let structural_similarity = (size_similarity(source.content_length, target.content_length)
            + size_similarity(source.tag_count, target.tag_count))
            / 2.0;

        let overall_similarity = (semantic_similarity * self.weights.title_weight
            + content_similarity * self.weights.description_weight
            + tag_overlap_score * self.weights.tags_weight)
            .clamp(0.0, 1.0);

        let url_domain = (!source.url_domain.is_empty() && source.url_domain == target.url_domain)
            .then(|| source.url_domain.clone());

        SimilarityAnalysis {
            semantic_similarity,
            tag_overlap_score,
            content_similarity,
            structural_similarity,
            overall_similarity,
            shared_elements: SharedElements {
                tags: source.tag_set.intersection(&target.tag_set).cloned().collect(),
                words: source_words
                    .intersection(&target_words)
                    .map(|w| w.to_string())
                    .collect(),
                url_domain,
            },
        }
    }
}

/// Cosine similarity; 0 when the lengths differ or either vector is zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    (dot / (magnitude_a * magnitude_b)).clamp(0.0, 1.0)
}

/// Jaccard index with the union size floored at 1, so two empty sets score 0.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count().max(1);
    intersection as f64 / union as f64
}

/// `1 - |a - b| / max(a, b, 1)`
fn size_similarity(a: usize, b: usize) -> f64 {
    let diff = a.abs_diff(b) as f64;
    let max = a.max(b).max(1) as f64;
    1.0 - diff / max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn features(name: &str, description: &str, tags: &[&str]) -> FeatureBag {
        FeatureBag::from_item(
            &Item::new(name, name)
                .with_description(description)
                .with_tags(tags.iter().copied()),
        )
    }

    #[test]
    fn test_identical_tags_disjoint_text() {
        let a = features("Kestrel", "harbour cranes unload containers", &["ops", "logistics", "shipping"]);
        let b = features("Osprey", "quarterly invoices reconcile ledgers", &["Shipping", "ops", "logistics"]);

        let analysis = SimilarityAnalyzer::default().analyze(&a, &b);

        assert_eq!(analysis.tag_overlap_score, 1.0);
        assert_eq!(analysis.content_similarity, 0.0);
        assert_eq!(analysis.semantic_similarity, 0.0);
        assert!((analysis.overall_similarity - 0.2).abs() < 1e-9);
        assert_eq!(analysis.shared_elements.tags, vec!["logistics", "ops", "shipping"]);
        assert!(analysis.shared_elements.words.is_empty());
    }

    #[test]
    fn test_symmetry() {
        let a = features("React", "javascript library for interfaces", &["frontend", "web"]);
        let b = features("Vue", "progressive javascript framework", &["frontend"]);
        let analyzer = SimilarityAnalyzer::default();

        let ab = analyzer.analyze(&a, &b);
        let ba = analyzer.analyze(&b, &a);

        assert_eq!(ab.tag_overlap_score, ba.tag_overlap_score);
        assert_eq!(ab.content_similarity, ba.content_similarity);
        assert_eq!(ab.structural_similarity, ba.structural_similarity);
        assert_eq!(ab.semantic_similarity, ba.semantic_similarity);
        assert_eq!(ab.shared_elements, ba.shared_elements);
    }

    #[test]
    fn test_identical_items() {
        let a = features("Python data analytics", "machine learning platform", &["ai"]);
        let analysis = SimilarityAnalyzer::default().analyze(&a, &a.clone());
        assert!((analysis.semantic_similarity - 1.0).abs() < 1e-9);
        assert_eq!(analysis.content_similarity, 1.0);
        assert_eq!(analysis.structural_similarity, 1.0);
        assert!((analysis.overall_similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_domain() {
        let a = FeatureBag::from_item(&Item::new("a", "a").with_url("https://github.com/a"));
        let b = FeatureBag::from_item(&Item::new("b", "b").with_url("https://www.github.com/b"));
        let c = FeatureBag::from_item(&Item::new("c", "c"));

        let analyzer = SimilarityAnalyzer::default();
        assert_eq!(
            analyzer.analyze(&a, &b).shared_elements.url_domain.as_deref(),
            Some("github.com")
        );
        assert!(analyzer.analyze(&c, &c).shared_elements.url_domain.is_none());
    }

    #[test]
    fn test_overall_is_clamped() {
        let analyzer = SimilarityAnalyzer::new(TextAnalysisWeights {
            title_weight: 1.0,
            description_weight: 1.0,
            tags_weight: 1.0,
        });
        let a = features("Python data", "python data", &["x"]);
        assert_eq!(analyzer.analyze(&a, &a).overall_similarity, 1.0);
    }

    #[test]
    fn test_cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[1.0, 0.0]) - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        let empty: BTreeSet<&str> = BTreeSet::new();
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_structural_similarity() {
        let a = features("a", "aaaaaaaaaa", &["x", "y"]);
        let b = features("b", "aaaaa", &["x"]);
        let analysis = SimilarityAnalyzer::default().analyze(&a, &b);
        // length 0.5, tag count 0.5
        assert!((analysis.structural_similarity - 0.5).abs() < 1e-9);
    }
}
