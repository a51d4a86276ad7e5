//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &IntelConfig) -> Result<(), ConfigError> {
    validate_categorization(&config.categorization)?;
    validate_relationships(&config.relationships)?;
    validate_store_config(&config.store)?;

    Ok(())
}

/// Validate a categorization schema.
pub fn validate_categorization(config: &CategorizationConfig) -> Result<(), ConfigError> {
    let scoring = &config.confidence_scoring;
    non_negative("confidence_scoring.keyword_match_weight", scoring.keyword_match_weight)?;
    non_negative("confidence_scoring.content_pattern_weight", scoring.content_pattern_weight)?;
    non_negative("confidence_scoring.title_analysis_weight", scoring.title_analysis_weight)?;
    non_negative("confidence_scoring.existing_tags_weight", scoring.existing_tags_weight)?;

    let factors = &scoring.adjustment_factors;
    non_negative("adjustment_factors.url_domain_match", factors.url_domain_match)?;
    non_negative(
        "adjustment_factors.description_length_bonus",
        factors.description_length_bonus,
    )?;
    non_negative(
        "adjustment_factors.multiple_pattern_bonus",
        factors.multiple_pattern_bonus,
    )?;

    for (name, category) in &config.category_mapping.primary_categories {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Category name cannot be empty".to_string(),
            ));
        }
        non_negative(&format!("primary_categories.{}.weight", name), category.weight)?;
    }

    for (database, rules) in &config.database_category_rules {
        unit_interval(
            &format!("database_category_rules.{}.min_confidence", database),
            rules.min_confidence,
        )?;
    }

    let bounds = &config.validation_rules;
    if bounds.min_categories_per_item > bounds.max_categories_per_item {
        return Err(ConfigError::ValidationError(format!(
            "min_categories_per_item ({}) exceeds max_categories_per_item ({})",
            bounds.min_categories_per_item, bounds.max_categories_per_item
        )));
    }

    Ok(())
}

/// Validate a relationship schema.
pub fn validate_relationships(config: &RelationshipConfig) -> Result<(), ConfigError> {
    for (name, settings) in &config.relationship_types {
        unit_interval(
            &format!("relationship_types.{}.threshold", name),
            settings.threshold,
        )?;
        non_negative(&format!("relationship_types.{}.weight", name), settings.weight)?;
    }

    let weights = &config.semantic_similarity.text_analysis;
    non_negative("text_analysis.title_weight", weights.title_weight)?;
    non_negative("text_analysis.description_weight", weights.description_weight)?;
    non_negative("text_analysis.tags_weight", weights.tags_weight)?;

    unit_interval(
        "validation_rules.minimum_relationship_strength",
        config.validation_rules.minimum_relationship_strength,
    )?;

    if config.validation_rules.maximum_relationships_per_item == 0 {
        return Err(ConfigError::ValidationError(
            "validation_rules.maximum_relationships_per_item must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Validate store bounds.
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.history_limit == 0 {
        return Err(ConfigError::ValidationError(
            "store.history_limit must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "{} must be a finite, non-negative number (got {})",
            field, value
        )));
    }
    Ok(())
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be within [0, 1] (got {})",
            field, value
        )));
    }
    Ok(())
}
