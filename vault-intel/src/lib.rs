//! # Vault Intel
//!
//! Content intelligence for personal knowledge vaults: assigns categories from a
//! controlled vocabulary and discovers relationships between items held in
//! independent collections, without embeddings or ML models.
//!
//! ## Quick Start
//!
//! ```rust
//! use vault_intel::prelude::*;
//!
//! let config = ConfigBuilder::knowledge_vault().build()?;
//! let categorizer = ContentCategorizer::new(config.categorization.clone());
//! let mut store = InMemoryStore::new(&config.store);
//!
//! let item = Item::new("react-001", "React Development Framework")
//!     .with_description("JavaScript library for component-based user interfaces")
//!     .with_url("https://reactjs.org")
//!     .with_tags(["javascript", "frontend"]);
//!
//! let result = categorizer.categorize_and_record(&item, "knowledge_vault", &mut store);
//! assert!(result.quality_score >= 0.0 && result.quality_score <= 1.0);
//! # Ok::<(), vault_intel::VaultIntelError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Item ──> FeatureBag ──┬──> pattern analysis ───> category scoring ──> collection rules ──> selection
//!                       └──> similarity analysis ─> relationship scoring ─> strength filter ──> cap per item
//! ```
//!
//! Scoring is a pure function of the item and the configuration. Everything
//! that accumulates across calls (history, learning records, discovered
//! relationships, the similarity cache) lives in an [`store::IntelligenceStore`]
//! passed explicitly by the caller.

pub mod analysis;
pub mod categorization;
pub mod config;
pub mod features;
pub mod logging;
pub mod models;
pub mod reasoning;
pub mod relationships;
pub mod scoring;
pub mod store;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::categorization::{
        CategorizationStatistics, ContentCategorizer, Feedback, PatternUpdates,
    };
    pub use crate::config::{
        CategorizationConfig, ConfigBuilder, ConfigLoader, IntelConfig, LogLevel,
        RelationshipConfig, StoreConfig,
    };
    pub use crate::features::FeatureBag;
    pub use crate::models::{
        CategorizationResult, CategoryAnalysis, Item, RelationshipResult, SimilarityAnalysis,
    };
    pub use crate::relationships::{
        CrossDatabaseReport, DiscoveryStatistics, RelationshipDiscovery, RelationshipKind,
    };
    pub use crate::store::{
        CategorizationStore, InMemoryStore, IntelligenceStore, NoopStore, RelationshipStore,
    };
    pub use crate::{Result, VaultIntelError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Vault Intel operations
#[derive(Debug, thiserror::Error)]
pub enum VaultIntelError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error raised inside a single scoring pipeline
    #[error("Scoring error: {0}")]
    Scoring(#[from] scoring::ScoringError),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// IO error while reading inputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<config::ConfigError> for VaultIntelError {
    fn from(err: config::ConfigError) -> Self {
        VaultIntelError::Configuration(err.to_string())
    }
}

/// Result type for Vault Intel operations
pub type Result<T> = std::result::Result<T, VaultIntelError>;

/// Initialize logging from the configuration and return it unchanged.
///
/// Logging errors are ignored when a global subscriber is already installed,
/// which is the common case in tests and embedding applications.
pub fn init(config: config::IntelConfig) -> Result<config::IntelConfig> {
    let _ = logging::init(&config.logging);
    Ok(config)
}
