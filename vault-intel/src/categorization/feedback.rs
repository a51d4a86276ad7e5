//! User feedback on assigned categories.

use crate::config::CategorizationConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Confidence adjustment per correct or incorrect mention of a category.
pub const FEEDBACK_STEP: f64 = 0.05;

/// Corrections for one categorized item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Feedback {
    pub item_id: String,
    pub correct_categories: Vec<String>,
    pub incorrect_categories: Vec<String>,
}

/// Adjustments derived from a batch of feedback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatternUpdates {
    /// Net adjustment per category
    pub confidence_adjustments: BTreeMap<String, f64>,
}

impl PatternUpdates {
    /// Sum the adjustments implied by each feedback entry.
    pub fn from_feedback(feedback: &[Feedback]) -> Self {
        let mut updates = PatternUpdates::default();

        for entry in feedback {
            for category in &entry.correct_categories {
                *updates
                    .confidence_adjustments
                    .entry(category.clone())
                    .or_default() += FEEDBACK_STEP;
            }
            for category in &entry.incorrect_categories {
                *updates
                    .confidence_adjustments
                    .entry(category.clone())
                    .or_default() -= FEEDBACK_STEP;
            }
        }

        updates
    }

    pub fn is_empty(&self) -> bool {
        self.confidence_adjustments.is_empty()
    }

    /// Adjustment of a category, 0 when it received no feedback.
    pub fn adjustment(&self, category: &str) -> f64 {
        self.confidence_adjustments
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }

    /// A copy of `config` with each adjustment added to the weight of its
    /// category. Weights never drop below 0. Unknown categories are skipped.
    pub fn apply(&self, config: &CategorizationConfig) -> CategorizationConfig {
        let mut updated = config.clone();

        for (category, adjustment) in &self.confidence_adjustments {
            match updated
                .category_mapping
                .primary_categories
                .get_mut(category)
            {
                Some(definition) => {
                    definition.weight = (definition.weight + adjustment).max(0.0);
                    debug!(category, weight = definition.weight, "Adjusted category weight");
                }
                None => warn!(category, "Feedback for unknown category ignored"),
            }
        }

        updated
    }
}
