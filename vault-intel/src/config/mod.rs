//! Configuration system for Vault Intel.
//!
//! Configuration is strongly typed and validated once at load time; the
//! scoring components receive it as an explicit parameter. Files may be
//! YAML, JSON or TOML, and environment variables prefixed with
//! [`ENV_PREFIX`] override file values.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::{ConfigLoader, load_categorization_schema, load_relationship_schema};
pub use models::*;
pub use validation::{validate_categorization, validate_config, validate_relationships};

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "vault-intel.yaml",
    "vault-intel.yml",
    "vault-intel.toml",
    "vault-intel.json",
    ".vault-intel/config.yaml",
    ".vault-intel/config.yml",
    ".vault-intel/config.toml",
    ".vault-intel/config.json",
];

/// Environment variable prefix for Vault Intel configuration.
///
/// Nested keys are separated by a double underscore, e.g.
/// `VAULT_INTEL_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "VAULT_INTEL_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
