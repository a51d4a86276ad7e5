//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating IntelConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: IntelConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: IntelConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: IntelConfig) -> Self {
        Self { config }
    }

    /// Replace the categorization section.
    pub fn with_categorization(mut self, categorization: CategorizationConfig) -> Self {
        self.config.categorization = categorization;
        self
    }

    /// Replace the relationship section.
    pub fn with_relationships(mut self, relationships: RelationshipConfig) -> Self {
        self.config.relationships = relationships;
        self
    }

    /// Add or replace a primary category.
    pub fn with_category<I, S>(mut self, name: impl Into<String>, subcategories: I, weight: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.categorization.category_mapping.primary_categories.insert(
            name.into(),
            CategoryDefinition {
                subcategories: subcategories.into_iter().map(Into::into).collect(),
                weight,
            },
        );
        self
    }

    /// Set the content patterns for a category. Each pattern is a
    /// `|`-separated keyword list.
    pub fn with_content_patterns<I, S>(mut self, category: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.categorization.semantic_analysis.content_patterns.insert(
            category.into(),
            patterns.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Set the URL domain allow-list for a category.
    pub fn with_domain_mapping<I, S>(mut self, category: impl Into<String>, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .categorization
            .confidence_scoring
            .domain_mappings
            .insert(category.into(), domains.into_iter().map(Into::into).collect());
        self
    }

    /// Set the scoring weights for pattern and subcategory evidence.
    pub fn with_scoring_weights(mut self, keyword_match_weight: f64, content_pattern_weight: f64) -> Self {
        let scoring = &mut self.config.categorization.confidence_scoring;
        scoring.keyword_match_weight = keyword_match_weight;
        scoring.content_pattern_weight = content_pattern_weight;
        self
    }

    /// Set the additive confidence bonuses.
    pub fn with_adjustment_factors(mut self, factors: AdjustmentFactors) -> Self {
        self.config.categorization.confidence_scoring.adjustment_factors = factors;
        self
    }

    /// Add or replace the policy of a collection.
    pub fn with_database_rules(mut self, database_id: impl Into<String>, rules: DatabaseCategoryRules) -> Self {
        self.config
            .categorization
            .database_category_rules
            .insert(database_id.into(), rules);
        self
    }

    /// Set the global category count bounds.
    pub fn with_category_bounds(mut self, min_per_item: usize, max_per_item: usize) -> Self {
        self.config.categorization.validation_rules = CategoryValidationRules {
            min_categories_per_item: min_per_item,
            max_categories_per_item: max_per_item,
        };
        self
    }

    /// Add or replace a relationship type.
    pub fn with_relationship_type(mut self, name: impl Into<String>, settings: RelationshipTypeConfig) -> Self {
        self.config
            .relationships
            .relationship_types
            .insert(name.into(), settings);
        self
    }

    /// Allow relationship types between two collections.
    pub fn with_cross_database_rule<I, S>(mut self, source_db: &str, target_db: &str, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.relationships.cross_database_rules.insert(
            pair_key(source_db, target_db),
            CrossDatabaseRule {
                relationship_types: types.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Set the weights of the overall similarity sum.
    pub fn with_text_analysis_weights(mut self, weights: TextAnalysisWeights) -> Self {
        self.config.relationships.semantic_similarity.text_analysis = weights;
        self
    }

    /// Set the strength floor for retained relationships.
    pub fn with_minimum_relationship_strength(mut self, strength: f64) -> Self {
        self.config
            .relationships
            .validation_rules
            .minimum_relationship_strength = strength;
        self
    }

    /// Set the number of relationships retained per source item.
    pub fn with_max_relationships_per_item(mut self, max: usize) -> Self {
        self.config
            .relationships
            .validation_rules
            .maximum_relationships_per_item = max;
        self
    }

    /// Set the per-collection item cap for cross-collection analysis.
    pub fn with_max_items_per_database(mut self, max: usize) -> Self {
        self.config.relationships.analysis.max_items_per_database = max;
        self
    }

    /// Set the number of categorization results kept in history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.store.history_limit = limit;
        self
    }

    /// Set the similarity cache capacity (0 disables caching).
    pub fn with_similarity_cache_size(mut self, size: usize) -> Self {
        self.config.store.similarity_cache_size = size;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sample configuration for a personal knowledge vault with six collections.
    ///
    /// This creates a configuration with:
    /// - Five primary categories with content patterns and subcategories
    /// - Rules for the six vault collections
    /// - All five built-in relationship types and cross-collection rules
    pub fn knowledge_vault() -> Self {
        Self::new()
            .with_category(
                "technology",
                ["programming", "frontend", "backend", "javascript", "framework", "devops"],
                1.0,
            )
            .with_content_patterns(
                "technology",
                ["framework|library|sdk|api", "javascript|python|rust|react|frontend|backend"],
            )
            .with_category(
                "business",
                ["startup", "marketing", "sales", "finance", "strategy"],
                1.0,
            )
            .with_content_patterns(
                "business",
                ["startup|revenue|market|customer", "business|strategy|sales|growth"],
            )
            .with_category(
                "productivity",
                ["workflow", "automation", "notes", "planning", "collaboration"],
                0.9,
            )
            .with_content_patterns(
                "productivity",
                ["workflow|automation|task|habit", "notes|planning|calendar|team"],
            )
            .with_category(
                "ai_ml",
                ["machine learning", "neural", "llm", "model", "data"],
                1.1,
            )
            .with_content_patterns(
                "ai_ml",
                ["machine|learning|neural|model", "llm|gpt|training|inference"],
            )
            .with_category(
                "learning",
                ["course", "tutorial", "book", "guide", "documentation"],
                0.9,
            )
            .with_content_patterns(
                "learning",
                ["course|tutorial|lesson|guide", "book|documentation|learn|education"],
            )
            .with_database_rules(
                "knowledge_vault",
                DatabaseCategoryRules {
                    required_categories: vec![],
                    optional_categories: strings(&[
                        "technology",
                        "business",
                        "productivity",
                        "ai_ml",
                        "learning",
                    ]),
                    min_confidence: 0.3,
                    max_categories: 5,
                },
            )
            .with_database_rules(
                "tools_services",
                DatabaseCategoryRules {
                    required_categories: strings(&["technology"]),
                    optional_categories: strings(&["productivity", "ai_ml", "business"]),
                    min_confidence: 0.5,
                    max_categories: 3,
                },
            )
            .with_database_rules(
                "platforms_sites",
                DatabaseCategoryRules {
                    required_categories: vec![],
                    optional_categories: strings(&["technology", "business", "learning"]),
                    min_confidence: 0.4,
                    max_categories: 3,
                },
            )
            .with_database_rules(
                "business_ideas",
                DatabaseCategoryRules {
                    required_categories: strings(&["business"]),
                    optional_categories: strings(&["technology", "ai_ml", "productivity"]),
                    min_confidence: 0.5,
                    max_categories: 4,
                },
            )
            .with_database_rules(
                "learning_resources",
                DatabaseCategoryRules {
                    required_categories: strings(&["learning"]),
                    optional_categories: strings(&["technology", "ai_ml", "business"]),
                    min_confidence: 0.5,
                    max_categories: 4,
                },
            )
            .with_database_rules(
                "notes_ideas",
                DatabaseCategoryRules {
                    required_categories: vec![],
                    optional_categories: strings(&[
                        "technology",
                        "business",
                        "productivity",
                        "ai_ml",
                        "learning",
                    ]),
                    min_confidence: 0.3,
                    max_categories: 5,
                },
            )
            .with_relationship_type("semantic_similarity", relationship_type(0.7, 1.0, true))
            .with_relationship_type("tag_overlap", relationship_type(0.6, 1.0, true))
            .with_relationship_type("complementary", relationship_type(0.4, 1.0, true))
            .with_relationship_type("alternative", relationship_type(0.8, 1.0, true))
            .with_relationship_type("dependency", relationship_type(0.6, 0.9, false))
            .with_cross_database_rule(
                "tools_services",
                "platforms_sites",
                ["semantic_similarity", "tag_overlap", "alternative"],
            )
            .with_cross_database_rule(
                "knowledge_vault",
                "learning_resources",
                ["semantic_similarity", "complementary"],
            )
            .with_cross_database_rule(
                "business_ideas",
                "tools_services",
                ["dependency", "complementary", "tag_overlap"],
            )
            .with_cross_database_rule(
                "notes_ideas",
                "knowledge_vault",
                ["semantic_similarity", "tag_overlap"],
            )
            .with_cross_database_rule(
                "learning_resources",
                "platforms_sites",
                ["tag_overlap", "semantic_similarity"],
            )
    }

    /// Knowledge vault configuration with debug logging and small bounds.
    pub fn development() -> Self {
        Self::knowledge_vault()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
            .with_history_limit(100)
    }

    /// Knowledge vault configuration for automated tests: no cache, compact logs.
    pub fn testing() -> Self {
        Self::knowledge_vault()
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
            .with_similarity_cache_size(0)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<IntelConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn relationship_type(threshold: f64, weight: f64, bidirectional: bool) -> RelationshipTypeConfig {
    RelationshipTypeConfig {
        threshold,
        weight,
        bidirectional,
    }
}
