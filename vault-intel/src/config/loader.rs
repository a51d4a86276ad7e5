//! Configuration loader.
//!
//! This module provides functionality to load configuration from multiple sources.

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::*, validation};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Create a new configuration loader with default values.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(IntelConfig::default()));
        Self { figment }
    }

    /// Load configuration from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        let provider = file_provider(path)?;
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        Ok(self)
    }

    /// Load a standalone schema file into one section of the configuration,
    /// e.g. a categorization schema under `"categorization"`.
    pub fn load_section_file<P: AsRef<Path>>(&mut self, section: &str, path: P) -> Result<&mut Self> {
        let value: serde_json::Value = load_schema(path)?;
        let figment = std::mem::take(&mut self.figment).merge(Serialized::default(section, value));
        self.figment = figment;
        Ok(self)
    }

    /// Attempt to load from default configuration file locations.
    pub fn load_default_files(&mut self) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(file);
            if path.exists() && self.load_file(&path).is_ok() {
                debug!(path = %path.display(), "Loaded configuration file");
                break;
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "vault-intel", "vault-intel")
        {
            let config_dir = proj_dirs.config_dir();

            for ext in &["toml", "yaml", "yml", "json"] {
                let path = config_dir.join(format!("config.{}", ext));
                if path.exists() && self.load_file(&path).is_ok() {
                    debug!(path = %path.display(), "Loaded user configuration file");
                    break;
                }
            }
        }

        self
    }

    /// Load configuration from environment variables.
    ///
    /// Nested keys use `__` as separator: `VAULT_INTEL_STORE__HISTORY_LIMIT=50`.
    pub fn load_env(&mut self) -> &mut Self {
        let figment =
            std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<IntelConfig> {
        let config: IntelConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a figment provider based on the file extension.
fn file_provider(path: &Path) -> Result<Figment> {
    if !path.exists() {
        return Err(ConfigError::FileLoadError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Figment::from(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(Figment::from(Yaml::file(path))),
        Some("json") => Ok(Figment::from(Json::file(path))),
        _ => Err(ConfigError::FileLoadError(format!(
            "Unsupported file format: {}",
            path.display()
        ))),
    }
}

/// Strictly load one schema section from a standalone file.
pub(crate) fn load_schema<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    file_provider(path)?
        .extract()
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Load a categorization schema file.
///
/// A missing, unparsable or invalid file is logged and replaced by the empty
/// configuration, which scores no categories at all.
pub fn load_categorization_schema<P: AsRef<Path>>(path: P) -> CategorizationConfig {
    let path = path.as_ref();
    let loaded = load_schema::<CategorizationConfig, _>(path)
        .and_then(|config| validation::validate_categorization(&config).map(|_| config));

    match loaded {
        Ok(config) => {
            debug!(
                path = %path.display(),
                categories = config.category_count(),
                "Loaded categorization schema"
            );
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Using empty categorization configuration");
            CategorizationConfig::default()
        }
    }
}

/// Load a relationship schema file.
///
/// Degrades to the empty configuration the same way as
/// [`load_categorization_schema`]; with no cross-collection rules no
/// collection pair is analyzed.
pub fn load_relationship_schema<P: AsRef<Path>>(path: P) -> RelationshipConfig {
    let path = path.as_ref();
    let loaded = load_schema::<RelationshipConfig, _>(path)
        .and_then(|config| validation::validate_relationships(&config).map(|_| config));

    match loaded {
        Ok(config) => {
            debug!(
                path = %path.display(),
                types = config.relationship_types.len(),
                rules = config.cross_database_rules.len(),
                "Loaded relationship schema"
            );
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Using empty relationship configuration");
            RelationshipConfig::default()
        }
    }
}
