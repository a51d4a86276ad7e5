//! Category confidence scoring.

use super::{Result, ensure_finite};
use crate::analysis::{PatternScore, SemanticPatternAnalyzer};
use crate::config::{CategorizationConfig, CategoryDefinition, ConfidenceScoringConfig};
use crate::features::FeatureBag;
use crate::models::{CategoryAnalysis, StrengthFactors};
use std::collections::BTreeMap;
use tracing::trace;

/// Reasoning parts are only reported for contributions above this value.
const REASONING_THRESHOLD: f64 = 0.1;

/// Descriptions longer than this many characters earn the length bonus.
const DESCRIPTION_BONUS_LENGTH: usize = 100;

/// Scores every configured primary category for one item.
///
/// ```text
/// confidence = (pattern_score * content_pattern_weight
///               + subcategory_fraction * keyword_match_weight) * category_weight
///              + url_domain_match?  + description_length_bonus?  + multiple_pattern_bonus?
/// ```
#[derive(Debug, Clone)]
pub struct CategoryScorer {
    categories: BTreeMap<String, CategoryDefinition>,
    scoring: ConfidenceScoringConfig,
    patterns: SemanticPatternAnalyzer,
}

impl CategoryScorer {
    pub fn new(config: &CategorizationConfig) -> Self {
        Self {
            categories: config.category_mapping.primary_categories.clone(),
            scoring: config.confidence_scoring.clone(),
            patterns: SemanticPatternAnalyzer::new(&config.semantic_analysis),
        }
    }

    /// Names of the categories this scorer produces analyses for.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Analysis for every primary category, keyed by category name.
    pub fn score_all(&self, features: &FeatureBag) -> Result<BTreeMap<String, CategoryAnalysis>> {
        let pattern_scores = self.patterns.analyze(features);

        self.categories
            .iter()
            .map(|(name, definition)| {
                let analysis =
                    self.score_category(name, definition, pattern_scores.get(name), features)?;
                Ok((name.clone(), analysis))
            })
            .collect()
    }

    fn score_category(
        &self,
        name: &str,
        definition: &CategoryDefinition,
        pattern: Option<&PatternScore>,
        features: &FeatureBag,
    ) -> Result<CategoryAnalysis> {
        let mut confidence = 0.0;
        let mut reasoning_parts = Vec::new();
        let mut pattern_matches = Vec::new();

        let raw_pattern_score = pattern.map(|p| p.score).unwrap_or(0.0);
        if let Some(pattern) = pattern {
            let contribution = pattern.score * self.scoring.content_pattern_weight;
            confidence += contribution;
            if contribution > REASONING_THRESHOLD {
                pattern_matches = pattern.matched_groups.clone();
                reasoning_parts.push(format!("Semantic patterns match {}", name));
            }
        }

        let (subcategory_hits, keyword_matches) = subcategory_matches(definition, features);
        let subcategory_total = definition
            .subcategories
            .iter()
            .filter(|s| !s.trim().is_empty())
            .count();
        if subcategory_total > 0 {
            let contribution = subcategory_hits as f64 / subcategory_total as f64
                * self.scoring.keyword_match_weight;
            confidence += contribution;
            if contribution > REASONING_THRESHOLD {
                reasoning_parts.push(format!(
                    "Matches {} of {} subcategories",
                    subcategory_hits, subcategory_total
                ));
            }
        }

        confidence *= definition.weight;

        let factors = &self.scoring.adjustment_factors;
        if self.is_relevant_domain(&features.url_domain, name) {
            confidence += factors.url_domain_match;
            reasoning_parts.push("URL domain relevance bonus".to_string());
        }

        if features.content_length > DESCRIPTION_BONUS_LENGTH {
            confidence += factors.description_length_bonus;
        }

        if pattern_matches.len() > 1 {
            confidence += factors.multiple_pattern_bonus;
            reasoning_parts.push("Multiple pattern matches".to_string());
        }

        let confidence = ensure_finite(confidence, name, "confidence")?;

        trace!(category = name, confidence, "Scored category");

        Ok(CategoryAnalysis {
            category: name.to_string(),
            confidence: super::clamp_unit(confidence),
            strength_factors: StrengthFactors {
                semantic_patterns: raw_pattern_score,
                keyword_matches: keyword_matches.len(),
                pattern_matches: pattern_matches.len(),
                content_relevance: confidence,
            },
            keyword_matches,
            pattern_matches,
            reasoning: if reasoning_parts.is_empty() {
                "No strong indicators".to_string()
            } else {
                reasoning_parts.join("; ")
            },
        })
    }

    /// Whether the URL domain contains an entry of the category's allow-list.
    fn is_relevant_domain(&self, domain: &str, category: &str) -> bool {
        if domain.is_empty() {
            return false;
        }
        self.scoring
            .domain_mappings
            .get(category)
            .is_some_and(|domains| {
                domains
                    .iter()
                    .map(|d| d.trim().to_lowercase())
                    .any(|d| !d.is_empty() && domain.contains(&d))
            })
    }
}

/// Count subcategory hits. A subcategory counts once for a tag hit and once
/// more for a title or description hit, and is listed once per hit.
fn subcategory_matches(definition: &CategoryDefinition, features: &FeatureBag) -> (usize, Vec<String>) {
    let mut hits = 0;
    let mut matched = Vec::new();

    for subcategory in &definition.subcategories {
        let needle = subcategory.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }

        if features.any_tag_contains(&needle) {
            hits += 1;
            matched.push(subcategory.clone());
        }

        if features.title_lower.contains(&needle) || features.description_lower.contains(&needle) {
            hits += 1;
            matched.push(subcategory.clone());
        }
    }

    (hits, matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdjustmentFactors, ConfigBuilder};
    use crate::models::Item;

    fn react() -> Item {
        Item::new("react-001", "React Development Framework")
            .with_description("JavaScript library with a component-based architecture")
            .with_url("https://reactjs.org")
            .with_tags(["javascript", "frontend"])
    }

    fn technology_config(domains: &[&str]) -> CategorizationConfig {
        ConfigBuilder::new()
            .with_category("technology", ["frontend", "javascript", "framework", "devops"], 1.0)
            .with_content_patterns("technology", ["framework|component"])
            .with_domain_mapping("technology", domains.iter().copied())
            .build()
            .unwrap()
            .categorization
    }

    #[test]
    fn test_react_scenario() {
        let scorer = CategoryScorer::new(&technology_config(&["github.com"]));
        let analyses = scorer.score_all(&FeatureBag::from_item(&react())).unwrap();
        let technology = &analyses["technology"];

        // pattern: (0.4 + 0.3) / 2 = 0.35
        assert!((technology.strength_factors.semantic_patterns - 0.35).abs() < 1e-9);
        // subcategories: frontend (tag), javascript (tag + text), framework (text) = 4 of 4
        assert_eq!(technology.strength_factors.keyword_matches, 4);
        let expected = 0.35 * 0.3 + 1.0 * 0.4;
        assert!((technology.confidence - expected).abs() < 1e-9);
        assert!(technology.reasoning.contains("Matches 4 of 4 subcategories"));
        assert!(!technology.reasoning.contains("URL domain"));
    }

    #[test]
    fn test_react_scenario_with_domain_bonus() {
        let without = CategoryScorer::new(&technology_config(&["github.com"]))
            .score_all(&FeatureBag::from_item(&react()))
            .unwrap();
        let with = CategoryScorer::new(&technology_config(&["reactjs.org"]))
            .score_all(&FeatureBag::from_item(&react()))
            .unwrap();

        let delta = with["technology"].confidence - without["technology"].confidence;
        assert!((delta - 0.1).abs() < 1e-9);
        assert!(with["technology"].reasoning.contains("URL domain relevance bonus"));
    }

    #[test]
    fn test_no_evidence() {
        let scorer = CategoryScorer::new(&technology_config(&[]));
        let item = Item::new("x", "Sourdough starter").with_tags(["baking"]);
        let analyses = scorer.score_all(&FeatureBag::from_item(&item)).unwrap();

        assert_eq!(analyses["technology"].confidence, 0.0);
        assert_eq!(analyses["technology"].reasoning, "No strong indicators");
    }

    #[test]
    fn test_multiple_pattern_bonus() {
        let config = ConfigBuilder::new()
            .with_category("learning", ["course"], 1.0)
            .with_content_patterns("learning", ["course", "tutorial"])
            .build()
            .unwrap()
            .categorization;
        let item = Item::new("l", "Rust course").with_description("A tutorial");
        let analysis = &CategoryScorer::new(&config)
            .score_all(&FeatureBag::from_item(&item))
            .unwrap()["learning"];

        // pattern (0.4 + 0.3) / 2 = 0.35 -> 0.105 weighted, two groups matched
        assert_eq!(analysis.pattern_matches, vec!["course", "tutorial"]);
        assert!(analysis.reasoning.contains("Multiple pattern matches"));
        let expected = 0.35 * 0.3 + 0.4 + 0.15;
        assert!((analysis.confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn test_description_length_bonus_and_clamp() {
        let config = ConfigBuilder::new()
            .with_category("technology", ["rust"], 3.0)
            .with_adjustment_factors(AdjustmentFactors::default())
            .build()
            .unwrap()
            .categorization;
        let item = Item::new("r", "Rust").with_description("r".repeat(101));
        let analysis = &CategoryScorer::new(&config)
            .score_all(&FeatureBag::from_item(&item))
            .unwrap()["technology"];

        assert_eq!(analysis.confidence, 1.0);
        assert!(analysis.strength_factors.content_relevance > 1.0);
    }

    #[test]
    fn test_category_weight_scales_before_bonuses() {
        let config = ConfigBuilder::new()
            .with_category("business", ["startup"], 0.5)
            .with_domain_mapping("business", ["forbes.com"])
            .build()
            .unwrap()
            .categorization;
        let item = Item::new("b", "Startup ideas").with_url("https://www.forbes.com/x");
        let analysis = &CategoryScorer::new(&config)
            .score_all(&FeatureBag::from_item(&item))
            .unwrap()["business"];

        assert!((analysis.confidence - (0.4 * 0.5 + 0.1)).abs() < 1e-9);
    }
}
