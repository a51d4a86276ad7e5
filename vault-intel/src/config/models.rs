//! Configuration model definitions.
//!
//! The categorization and relationship sections mirror the layout of the
//! standalone schema files consumed by the ingestion pipeline, so either the
//! combined `IntelConfig` or one section on its own can be deserialized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for Vault Intel.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct IntelConfig {
    /// Category vocabulary, scoring weights and per-collection rules
    pub categorization: CategorizationConfig,

    /// Relationship types, cross-collection rules and similarity weights
    pub relationships: RelationshipConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Bounds for the in-memory intelligence store
    pub store: StoreConfig,
}

// ---------------------------------------------------------------------------
// Categorization
// ---------------------------------------------------------------------------

/// Categorization schema.
///
/// The default value has no categories at all, which is also what a missing
/// or unreadable schema file degrades to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CategorizationConfig {
    /// Keyword patterns per category
    pub semantic_analysis: SemanticAnalysisConfig,

    /// Primary categories with their subcategories and importance weight
    pub category_mapping: CategoryMappingConfig,

    /// Weights and additive bonuses used by the scoring engine
    pub confidence_scoring: ConfidenceScoringConfig,

    /// Per-collection policy, keyed by collection id
    pub database_category_rules: BTreeMap<String, DatabaseCategoryRules>,

    /// Global bounds applied when validating a result
    pub validation_rules: CategoryValidationRules,
}

impl CategorizationConfig {
    /// Rules for a collection, if any are configured.
    pub fn rules_for(&self, database_id: &str) -> Option<&DatabaseCategoryRules> {
        self.database_category_rules.get(database_id)
    }

    /// Number of primary categories that will be scored.
    pub fn category_count(&self) -> usize {
        self.category_mapping.primary_categories.len()
    }
}

/// Keyword patterns used by the semantic pattern analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SemanticAnalysisConfig {
    /// Pattern strings per category. Each string is a `|`-separated keyword list,
    /// e.g. `"framework|library|sdk"`.
    pub content_patterns: BTreeMap<String, Vec<String>>,
}

/// Primary category vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CategoryMappingConfig {
    /// Category definitions keyed by category name
    pub primary_categories: BTreeMap<String, CategoryDefinition>,
}

/// One primary category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryDefinition {
    /// Subcategory terms matched against tags and text
    pub subcategories: Vec<String>,

    /// Importance multiplier applied before bonuses
    pub weight: f64,
}

impl Default for CategoryDefinition {
    fn default() -> Self {
        Self {
            subcategories: Vec::new(),
            weight: 1.0,
        }
    }
}

/// Weights and adjustments for category confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfidenceScoringConfig {
    /// Weight of the subcategory match fraction
    pub keyword_match_weight: f64,

    /// Weight of the semantic pattern score
    pub content_pattern_weight: f64,

    /// Accepted for schema compatibility. Field weights inside the pattern
    /// analyzer are fixed (title 0.4, description 0.3, URL 0.2, tags 0.1).
    pub title_analysis_weight: f64,

    /// Accepted for schema compatibility, see `title_analysis_weight`.
    pub existing_tags_weight: f64,

    /// Additive bonuses
    pub adjustment_factors: AdjustmentFactors,

    /// URL domain allow-lists per category. A URL domain matches when it
    /// contains one of the listed entries.
    pub domain_mappings: BTreeMap<String, Vec<String>>,
}

impl Default for ConfidenceScoringConfig {
    fn default() -> Self {
        Self {
            keyword_match_weight: 0.4,
            content_pattern_weight: 0.3,
            title_analysis_weight: 0.2,
            existing_tags_weight: 0.1,
            adjustment_factors: AdjustmentFactors::default(),
            domain_mappings: default_domain_mappings(),
        }
    }
}

fn default_domain_mappings() -> BTreeMap<String, Vec<String>> {
    let lists: [(&str, &[&str]); 3] = [
        (
            "technology",
            &["github.com", "stackoverflow.com", "dev.to", "npmjs.com"],
        ),
        (
            "business",
            &["business.com", "entrepreneur.com", "inc.com", "forbes.com"],
        ),
        (
            "productivity",
            &["notion.so", "slack.com", "trello.com", "asana.com"],
        ),
    ];

    lists
        .into_iter()
        .map(|(category, domains)| {
            (
                category.to_string(),
                domains.iter().map(|d| d.to_string()).collect(),
            )
        })
        .collect()
}

/// Additive confidence bonuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdjustmentFactors {
    /// Added when the item's URL domain is on the category allow-list
    pub url_domain_match: f64,

    /// Added when the description is longer than 100 characters
    pub description_length_bonus: f64,

    /// Added when more than one pattern group matched
    pub multiple_pattern_bonus: f64,
}

impl Default for AdjustmentFactors {
    fn default() -> Self {
        Self {
            url_domain_match: 0.1,
            description_length_bonus: 0.05,
            multiple_pattern_bonus: 0.15,
        }
    }
}

/// Policy for one collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseCategoryRules {
    /// Categories the collection expects every item to carry
    pub required_categories: Vec<String>,

    /// Further categories allowed in the collection
    pub optional_categories: Vec<String>,

    /// Minimum confidence for a category to survive filtering
    pub min_confidence: f64,

    /// Maximum number of categories assigned to one item
    pub max_categories: usize,
}

impl Default for DatabaseCategoryRules {
    fn default() -> Self {
        Self {
            required_categories: Vec::new(),
            optional_categories: Vec::new(),
            min_confidence: 0.5,
            max_categories: 5,
        }
    }
}

impl DatabaseCategoryRules {
    /// Whether the category is listed as required or optional.
    pub fn allows(&self, category: &str) -> bool {
        self.is_required(category) || self.optional_categories.iter().any(|c| c == category)
    }

    /// Whether the category is listed as required.
    pub fn is_required(&self, category: &str) -> bool {
        self.required_categories.iter().any(|c| c == category)
    }
}

/// Global validation bounds for categorization results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryValidationRules {
    pub min_categories_per_item: usize,
    pub max_categories_per_item: usize,
}

impl Default for CategoryValidationRules {
    fn default() -> Self {
        Self {
            min_categories_per_item: 1,
            max_categories_per_item: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// Relationship discovery schema.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RelationshipConfig {
    /// Per-type threshold, weight and direction
    pub relationship_types: BTreeMap<String, RelationshipTypeConfig>,

    /// Allowed relationship types per collection pair, keyed `"{a}_to_{b}"`
    pub cross_database_rules: BTreeMap<String, CrossDatabaseRule>,

    /// Weights for the overall similarity measure
    pub semantic_similarity: SemanticSimilarityConfig,

    /// Strength floor and per-item cap
    pub validation_rules: RelationshipValidationRules,

    /// Limits for cross-collection analysis
    pub analysis: CrossDatabaseAnalysisConfig,
}

impl RelationshipConfig {
    /// Type settings, falling back to the defaults for unconfigured types.
    pub fn type_config(&self, name: &str) -> RelationshipTypeConfig {
        self.relationship_types
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Rule for a collection pair, checking the forward key before the reverse one.
    pub fn rule_for(&self, source_db: &str, target_db: &str) -> Option<&CrossDatabaseRule> {
        self.cross_database_rules
            .get(&pair_key(source_db, target_db))
            .or_else(|| self.cross_database_rules.get(&pair_key(target_db, source_db)))
    }
}

/// Key used in `cross_database_rules`.
pub fn pair_key(source_db: &str, target_db: &str) -> String {
    format!("{}_to_{}", source_db, target_db)
}

/// Settings for one relationship type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelationshipTypeConfig {
    /// Minimum strength for a candidate of this type to be emitted
    pub threshold: f64,

    /// Multiplier applied to the base score
    pub weight: f64,

    /// Whether edges of this type are reported as bidirectional
    pub bidirectional: bool,
}

impl Default for RelationshipTypeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            weight: 1.0,
            bidirectional: true,
        }
    }
}

/// Relationship types allowed for one collection pair.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CrossDatabaseRule {
    pub relationship_types: Vec<String>,
}

/// Similarity weighting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SemanticSimilarityConfig {
    pub text_analysis: TextAnalysisWeights,
}

/// Weights of the overall similarity sum.
///
/// `title_weight` applies to the semantic vector similarity and
/// `description_weight` to token similarity; the names follow the schema file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextAnalysisWeights {
    pub title_weight: f64,
    pub description_weight: f64,
    pub tags_weight: f64,
}

impl Default for TextAnalysisWeights {
    fn default() -> Self {
        Self {
            title_weight: 0.4,
            description_weight: 0.4,
            tags_weight: 0.2,
        }
    }
}

/// Global relationship validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelationshipValidationRules {
    pub minimum_relationship_strength: f64,
    pub maximum_relationships_per_item: usize,
}

impl Default for RelationshipValidationRules {
    fn default() -> Self {
        Self {
            minimum_relationship_strength: 0.6,
            maximum_relationships_per_item: 20,
        }
    }
}

/// Limits for `analyze_cross_database`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrossDatabaseAnalysisConfig {
    /// Items taken from each side of a collection pair (quadratic workload cap)
    pub max_items_per_database: usize,

    /// Number of relationships listed in the report's top list
    pub top_relationships: usize,
}

impl Default for CrossDatabaseAnalysisConfig {
    fn default() -> Self {
        Self {
            max_items_per_database: 100,
            top_relationships: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Bounds for the in-memory intelligence store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Categorization results kept in history (oldest evicted first)
    pub history_limit: usize,

    /// Learning records kept per category (oldest evicted first)
    pub learning_records_per_category: usize,

    /// Capacity of the similarity cache; 0 disables caching
    pub similarity_cache_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: 1000,
            learning_records_per_category: 250,
            similarity_cache_size: 4096,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
