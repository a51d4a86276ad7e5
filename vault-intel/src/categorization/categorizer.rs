//! The categorization pipeline.

use super::feedback::{Feedback, PatternUpdates};
use super::rules::{self, Selection, Validation};
use super::statistics::CategorizationStatistics;
use crate::config::CategorizationConfig;
use crate::features::FeatureBag;
use crate::models::{CategorizationResult, Item};
use crate::reasoning::{alternative_categories, category_reasoning};
use crate::scoring::{self, CategoryScorer, ensure_database_id};
use crate::store::CategorizationStore;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, error, info};

/// Assigns categories to items.
///
/// The categorizer holds only configuration; results are recorded in a
/// [`CategorizationStore`] supplied by the caller.
#[derive(Debug, Clone)]
pub struct ContentCategorizer {
    config: CategorizationConfig,
    scorer: CategoryScorer,
}

impl ContentCategorizer {
    pub fn new(config: CategorizationConfig) -> Self {
        let scorer = CategoryScorer::new(&config);
        Self { config, scorer }
    }

    pub fn config(&self) -> &CategorizationConfig {
        &self.config
    }

    /// Categorize one item for a collection without recording anything.
    ///
    /// Never fails: pipeline errors produce an empty result whose reasoning
    /// holds the error text.
    pub fn categorize(&self, item: &Item, database_id: &str) -> CategorizationResult {
        self.evaluate(item, database_id).0
    }

    /// Categorize one item and record it in the store's history.
    pub fn categorize_and_record<S>(
        &self,
        item: &Item,
        database_id: &str,
        store: &mut S,
    ) -> CategorizationResult
    where
        S: CategorizationStore + ?Sized,
    {
        let (result, features) = self.evaluate(item, database_id);
        if let Some(features) = features {
            store.record_categorization(&result, &features);
        }
        result
    }

    /// Categorize items one after another, in input order.
    pub fn batch_categorize<S>(
        &self,
        items: &[Item],
        database_id: &str,
        store: &mut S,
    ) -> Vec<CategorizationResult>
    where
        S: CategorizationStore + ?Sized,
    {
        info!(
            "Starting batch categorization for {} items in {}",
            items.len(),
            database_id
        );
        let start = Instant::now();

        let results: Vec<CategorizationResult> = items
            .iter()
            .map(|item| self.categorize_and_record(item, database_id, store))
            .collect();

        log_batch_summary(&results, start);
        results
    }

    /// Categorize items in parallel.
    ///
    /// Scoring runs on the rayon pool; results are then recorded in a single
    /// pass, so history order matches input order.
    pub fn par_batch_categorize<S>(
        &self,
        items: &[Item],
        database_id: &str,
        store: &mut S,
    ) -> Vec<CategorizationResult>
    where
        S: CategorizationStore + ?Sized,
    {
        info!(
            "Starting parallel batch categorization for {} items in {}",
            items.len(),
            database_id
        );
        let start = Instant::now();

        let evaluated: Vec<(CategorizationResult, Option<FeatureBag>)> = items
            .par_iter()
            .map(|item| self.evaluate(item, database_id))
            .collect();

        let results: Vec<CategorizationResult> = evaluated
            .into_iter()
            .map(|(result, features)| {
                if let Some(features) = features {
                    store.record_categorization(&result, &features);
                }
                result
            })
            .collect();

        log_batch_summary(&results, start);
        results
    }

    /// Statistics over the store's categorization history.
    pub fn statistics<S>(&self, store: &S) -> CategorizationStatistics
    where
        S: CategorizationStore + ?Sized,
    {
        CategorizationStatistics::from_history(&store.history())
    }

    /// Turn user corrections into per-category adjustments.
    pub fn update_category_patterns(&self, feedback: &[Feedback]) -> PatternUpdates {
        info!(
            "Updating category patterns with {} feedback items",
            feedback.len()
        );
        let updates = PatternUpdates::from_feedback(feedback);
        debug!(
            "Derived {} category adjustments",
            updates.confidence_adjustments.len()
        );
        updates
    }

    /// A categorizer whose category weights include the given adjustments.
    pub fn with_updates(&self, updates: &PatternUpdates) -> Self {
        Self::new(updates.apply(&self.config))
    }

    /// Run the pipeline, timing it and turning errors into a failed result.
    /// Features are returned only on success, for recording.
    fn evaluate(&self, item: &Item, database_id: &str) -> (CategorizationResult, Option<FeatureBag>) {
        let start = Instant::now();

        match self.run_pipeline(item, database_id) {
            Ok((selection, validation, reasoning, alternatives, features)) => {
                let processing_time_ms = elapsed_ms(start);
                debug!(
                    "Categorized {}: {} categories ({:.1}ms, quality: {:.2})",
                    item.id,
                    selection.categories.len(),
                    processing_time_ms,
                    validation.quality_score
                );

                let result = CategorizationResult {
                    item_id: item.id.clone(),
                    database_id: database_id.to_string(),
                    assigned_categories: selection.categories,
                    confidence_scores: selection.confidence_scores,
                    reasoning,
                    alternative_categories: alternatives,
                    processing_time_ms,
                    validation_passed: validation.passed,
                    quality_score: validation.quality_score,
                };
                (result, Some(features))
            }
            Err(e) => {
                error!("Error categorizing content for {}: {}", item.id, e);
                let result =
                    CategorizationResult::failed(&item.id, database_id, e, elapsed_ms(start));
                (result, None)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn run_pipeline(
        &self,
        item: &Item,
        database_id: &str,
    ) -> scoring::Result<(Selection, Validation, Vec<String>, Vec<String>, FeatureBag)> {
        ensure_database_id(database_id)?;

        let features = FeatureBag::from_item(item);
        let scored = self.scorer.score_all(&features)?;

        let rules = self.config.rules_for(database_id);
        let filtered = rules::apply_database_rules(&scored, rules);

        let policy = rules.cloned().unwrap_or_default();
        let selection = rules::select_categories(&filtered, policy.max_categories);
        let validation =
            rules::validate_selection(&selection, &self.config.validation_rules, &policy);

        let reasoning = category_reasoning(&filtered, &selection.categories);
        let alternatives = alternative_categories(&scored, &selection.categories);

        Ok((selection, validation, reasoning, alternatives, features))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn log_batch_summary(results: &[CategorizationResult], start: Instant) {
    let batch_time = elapsed_ms(start);
    let successful = results.iter().filter(|r| r.validation_passed).count();
    info!(
        "Batch categorization completed: {}/{} successful ({:.1}ms total, {:.1}ms avg)",
        successful,
        results.len(),
        batch_time,
        batch_time / results.len().max(1) as f64
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::store::{InMemoryStore, MockCategorizationStore};

    fn categorizer() -> ContentCategorizer {
        ContentCategorizer::new(
            ConfigBuilder::knowledge_vault()
                .build()
                .unwrap()
                .categorization,
        )
    }

    fn notion() -> Item {
        Item::new("notion-1", "Notion workspace")
            .with_description("Notes, planning and task workflow automation for your team")
            .with_url("https://www.notion.so")
            .with_tags(["productivity", "notes", "workflow"])
    }

    #[test]
    fn test_categorize_productivity_tool() {
        let result = categorizer().categorize(&notion(), "notes_ideas");

        assert_eq!(result.item_id, "notion-1");
        assert_eq!(result.database_id, "notes_ideas");
        assert_eq!(result.assigned_categories.first().map(String::as_str), Some("productivity"));
        assert!(result.validation_passed);
        assert!(result.reasoning[0].starts_with("productivity: "));
        assert!(result.reasoning[0].contains("URL domain relevance bonus"));
        for category in &result.alternative_categories {
            assert!(!result.has_category(category));
        }
    }

    #[test]
    fn test_empty_database_id_fails_softly() {
        let result = categorizer().categorize(&notion(), "");

        assert!(!result.validation_passed);
        assert_eq!(result.quality_score, 0.0);
        assert!(result.assigned_categories.is_empty());
        assert_eq!(
            result.reasoning,
            vec!["Error in categorization: collection id must not be empty"]
        );
    }

    #[test]
    fn test_failed_result_is_not_recorded() {
        let mut store = MockCategorizationStore::new();
        store.expect_record_categorization().times(0);

        categorizer().categorize_and_record(&notion(), " ", &mut store);
    }

    #[test]
    fn test_successful_result_is_recorded_once() {
        let mut store = MockCategorizationStore::new();
        store
            .expect_record_categorization()
            .withf(|result, features| {
                result.item_id == "notion-1" && features.url_domain == "notion.so"
            })
            .times(1)
            .return_const(());

        categorizer().categorize_and_record(&notion(), "notes_ideas", &mut store);
    }

    #[test]
    fn test_batch_preserves_order() {
        let items: Vec<Item> = (0..5)
            .map(|i| notion().with_tags([format!("tag-{}", i)]))
            .enumerate()
            .map(|(i, mut item)| {
                item.id = format!("item-{}", i);
                item
            })
            .collect();

        let mut sequential = InMemoryStore::default();
        let mut parallel = InMemoryStore::default();
        let categorizer = categorizer();

        let a = categorizer.batch_categorize(&items, "notes_ideas", &mut sequential);
        let b = categorizer.par_batch_categorize(&items, "notes_ideas", &mut parallel);

        let ids = |results: &[CategorizationResult]| {
            results.iter().map(|r| r.item_id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(ids(&sequential.history()), ids(&a));
        assert_eq!(ids(&parallel.history()), ids(&a));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.assigned_categories, y.assigned_categories);
            assert_eq!(x.confidence_scores, y.confidence_scores);
        }
    }

    #[test]
    fn test_statistics_from_store() {
        let categorizer = categorizer();
        let mut store = InMemoryStore::default();
        assert!(categorizer.statistics(&store).report().is_none());

        categorizer.categorize_and_record(&notion(), "notes_ideas", &mut store);
        let stats = categorizer.statistics(&store);
        assert_eq!(stats.report().unwrap().performance_summary.total_categorizations, 1);
        assert!(!store.learning_records("productivity").is_empty());
    }

    #[test]
    fn test_feedback_updates_weights() {
        let categorizer = categorizer();
        let updates = categorizer.update_category_patterns(&[Feedback {
            item_id: "notion-1".to_string(),
            correct_categories: vec!["learning".to_string()],
            incorrect_categories: vec!["productivity".to_string()],
        }]);

        let updated = categorizer.with_updates(&updates);
        let before = &categorizer.config().category_mapping.primary_categories;
        let after = &updated.config().category_mapping.primary_categories;
        assert!((after["learning"].weight - (before["learning"].weight + 0.05)).abs() < 1e-9);
        assert!((after["productivity"].weight - (before["productivity"].weight - 0.05)).abs() < 1e-9);
    }
}
