//! Keyword pattern analysis per category.

use crate::config::SemanticAnalysisConfig;
use crate::features::FeatureBag;
use std::collections::BTreeMap;

/// Weight of a keyword hit in the title.
pub const TITLE_FIELD_WEIGHT: f64 = 0.4;
/// Weight of a keyword hit in the description.
pub const DESCRIPTION_FIELD_WEIGHT: f64 = 0.3;
/// Weight of a keyword hit in the URL.
pub const URL_FIELD_WEIGHT: f64 = 0.2;
/// Weight of a keyword hit in any existing tag.
pub const TAG_FIELD_WEIGHT: f64 = 0.1;

/// One configured pattern string, e.g. `"framework|library|sdk"`.
#[derive(Debug, Clone, PartialEq)]
struct PatternGroup {
    label: String,
    keywords: Vec<String>,
}

impl PatternGroup {
    fn parse(pattern: &str) -> Option<Self> {
        let keywords: Vec<String> = pattern
            .split('|')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return None;
        }

        Some(Self {
            label: keywords.join("|"),
            keywords,
        })
    }
}

/// Pattern evidence for one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternScore {
    /// Weighted keyword hits divided by the keyword count, in `[0, 1]`
    pub score: f64,
    /// Labels of the pattern groups with at least one hit in any field
    pub matched_groups: Vec<String>,
}

/// Scores how strongly an item's text matches each category's keyword patterns.
#[derive(Debug, Clone, Default)]
pub struct SemanticPatternAnalyzer {
    patterns: BTreeMap<String, Vec<PatternGroup>>,
}

impl SemanticPatternAnalyzer {
    /// Compile the configured pattern strings. Keywords are lower-cased and
    /// empty keywords are dropped.
    pub fn new(config: &SemanticAnalysisConfig) -> Self {
        let patterns = config
            .content_patterns
            .iter()
            .map(|(category, strings)| {
                let groups = strings
                    .iter()
                    .filter_map(|pattern| PatternGroup::parse(pattern))
                    .collect();
                (category.clone(), groups)
            })
            .collect();

        Self { patterns }
    }

    /// Whether patterns are configured for the category.
    pub fn has_patterns(&self, category: &str) -> bool {
        self.patterns.contains_key(category)
    }

    /// Keyword count of a category across all of its groups.
    pub fn keyword_count(&self, category: &str) -> usize {
        self.patterns
            .get(category)
            .map(|groups| groups.iter().map(|g| g.keywords.len()).sum())
            .unwrap_or(0)
    }

    /// Pattern score for every configured category.
    pub fn analyze(&self, features: &FeatureBag) -> BTreeMap<String, PatternScore> {
        self.patterns
            .iter()
            .map(|(category, groups)| (category.clone(), score_groups(groups, features)))
            .collect()
    }

    /// Pattern score for one category, `None` if it has no patterns.
    pub fn score_category(&self, category: &str, features: &FeatureBag) -> Option<PatternScore> {
        self.patterns
            .get(category)
            .map(|groups| score_groups(groups, features))
    }
}

fn score_groups(groups: &[PatternGroup], features: &FeatureBag) -> PatternScore {
    let mut weighted_hits = 0.0;
    let mut keyword_count = 0usize;
    let mut matched_groups = Vec::new();

    for group in groups {
        let mut group_hit = false;
        for keyword in &group.keywords {
            let hit = keyword_hit_weight(keyword, features);
            if hit > 0.0 {
                group_hit = true;
            }
            weighted_hits += hit;
        }
        keyword_count += group.keywords.len();
        if group_hit {
            matched_groups.push(group.label.clone());
        }
    }

    let score = if keyword_count == 0 {
        0.0
    } else {
        (weighted_hits / keyword_count as f64).min(1.0)
    };

    PatternScore {
        score,
        matched_groups,
    }
}

/// Sum of the field weights for every field containing the keyword.
fn keyword_hit_weight(keyword: &str, features: &FeatureBag) -> f64 {
    let mut weight = 0.0;
    if features.title_lower.contains(keyword) {
        weight += TITLE_FIELD_WEIGHT;
    }
    if features.description_lower.contains(keyword) {
        weight += DESCRIPTION_FIELD_WEIGHT;
    }
    if features.url_lower.contains(keyword) {
        weight += URL_FIELD_WEIGHT;
    }
    if features.any_tag_contains(keyword) {
        weight += TAG_FIELD_WEIGHT;
    }
    weight
}
