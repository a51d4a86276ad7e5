use std::path::Path;
use tracing::debug;
use vault_intel::config::{load_categorization_schema, load_relationship_schema};
use vault_intel::prelude::*;

/// Configuration and store shared by all commands of one invocation.
pub struct VaultCliContext {
    pub config: IntelConfig,
    pub store: InMemoryStore,
}

impl VaultCliContext {
    pub fn new(
        config_path: Option<&Path>,
        categorization_config: Option<&Path>,
        relationship_config: Option<&Path>,
        preset: bool,
    ) -> vault_intel::Result<Self> {
        let mut config = if let Some(path) = config_path {
            let mut loader = ConfigLoader::new();
            loader.load_file(path)?.load_env();
            loader.extract()?
        } else if preset {
            ConfigBuilder::knowledge_vault().build()?
        } else {
            let mut loader = ConfigLoader::new();
            loader.load_default_files().load_env();
            loader.extract()?
        };

        if let Some(path) = categorization_config {
            config.categorization = load_categorization_schema(path);
        }
        if let Some(path) = relationship_config {
            config.relationships = load_relationship_schema(path);
        }

        debug!(
            "Configuration loaded: {} categories, {} relationship types",
            config.categorization.category_count(),
            config.relationships.relationship_types.len()
        );

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: IntelConfig) -> Self {
        let store = InMemoryStore::new(&config.store);
        Self { config, store }
    }
}
