//! Per-collection policy: filtering, selection and validation.

use crate::config::{CategoryValidationRules, DatabaseCategoryRules};
use crate::models::CategoryAnalysis;
use crate::scoring::clamp_unit;
use std::collections::BTreeMap;

/// Categories must score above this to be selected at all.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// A required category within this fraction of `min_confidence` is admitted.
const REQUIRED_BOOST_RATIO: f64 = 0.8;
const REQUIRED_BOOST_MARGIN: f64 = 0.01;

const MAX_EXCEEDED_QUALITY: f64 = 0.5;
const MISSING_REQUIRED_QUALITY: f64 = 0.3;

/// Categories chosen for an item, strongest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub categories: Vec<String>,
    pub confidence_scores: BTreeMap<String, f64>,
}

/// Verdict on a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validation {
    pub passed: bool,
    pub quality_score: f64,
}

/// Keep the categories a collection allows.
///
/// Without rules every analysis passes unchanged. Otherwise a category must
/// be required or optional and reach `min_confidence`; a required category
/// that falls short by less than 20% is admitted just above the bar.
pub fn apply_database_rules(
    analyses: &BTreeMap<String, CategoryAnalysis>,
    rules: Option<&DatabaseCategoryRules>,
) -> BTreeMap<String, CategoryAnalysis> {
    let Some(rules) = rules else {
        return analyses.clone();
    };

    let mut filtered = BTreeMap::new();
    for (name, analysis) in analyses {
        if !rules.allows(name) {
            continue;
        }

        if analysis.confidence >= rules.min_confidence {
            filtered.insert(name.clone(), analysis.clone());
        } else if rules.is_required(name)
            && analysis.confidence >= rules.min_confidence * REQUIRED_BOOST_RATIO
        {
            let mut boosted = analysis.clone();
            boosted.confidence = clamp_unit(rules.min_confidence + REQUIRED_BOOST_MARGIN);
            boosted.reasoning.push_str(" (required category boost)");
            filtered.insert(name.clone(), boosted);
        }
    }

    filtered
}

/// Pick at most `max_categories` of the strongest categories, keeping only
/// those above [`SELECTION_THRESHOLD`]. Ties break by name.
pub fn select_categories(
    analyses: &BTreeMap<String, CategoryAnalysis>,
    max_categories: usize,
) -> Selection {
    let mut ranked: Vec<&CategoryAnalysis> = analyses.values().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.category.cmp(&b.category))
    });

    let mut selection = Selection::default();
    for analysis in ranked.into_iter().take(max_categories) {
        if analysis.confidence > SELECTION_THRESHOLD {
            selection.categories.push(analysis.category.clone());
            selection
                .confidence_scores
                .insert(analysis.category.clone(), analysis.confidence);
        }
    }

    selection
}

/// Check a selection against the global bounds and the collection policy.
///
/// The quality score is the mean of four factors: coverage of the minimum
/// count, the maximum count check, mean confidence and presence of a
/// required category. It is computed whether or not validation passes.
pub fn validate_selection(
    selection: &Selection,
    bounds: &CategoryValidationRules,
    rules: &DatabaseCategoryRules,
) -> Validation {
    let count = selection.categories.len();
    let mut passed = true;

    if count < bounds.min_categories_per_item {
        passed = false;
    }
    let coverage = if bounds.min_categories_per_item == 0 {
        1.0
    } else {
        (count as f64 / bounds.min_categories_per_item as f64).min(1.0)
    };

    let within_max = count <= bounds.max_categories_per_item;
    if !within_max {
        passed = false;
    }

    let mean_confidence = if selection.confidence_scores.is_empty() {
        0.0
    } else {
        selection.confidence_scores.values().sum::<f64>() / selection.confidence_scores.len() as f64
    };
    if mean_confidence < rules.min_confidence {
        passed = false;
    }

    let has_required = rules.required_categories.is_empty()
        || rules
            .required_categories
            .iter()
            .any(|required| selection.categories.contains(required));
    if !has_required {
        passed = false;
    }

    let factors = [
        coverage,
        if within_max { 1.0 } else { MAX_EXCEEDED_QUALITY },
        mean_confidence,
        if has_required { 1.0 } else { MISSING_REQUIRED_QUALITY },
    ];

    Validation {
        passed,
        quality_score: clamp_unit(factors.iter().sum::<f64>() / factors.len() as f64),
    }
}
