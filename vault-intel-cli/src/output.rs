use colored::*;
use serde_json::json;
use vault_intel::VaultIntelError;
use vault_intel::categorization::{CategorizationReport, CategorizationStatistics};
use vault_intel::config::IntelConfig;
use vault_intel::models::{CategorizationResult, RelationshipResult};
use vault_intel::relationships::{CrossDatabaseReport, DiscoveryStatistics};

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn category() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Output an error, as a JSON object on stderr in json mode.
pub fn output_error(error: &VaultIntelError, output_format: &str) {
    if output_format == "json" {
        let code = match error {
            VaultIntelError::Configuration(_) => "CONFIGURATION_ERROR",
            VaultIntelError::Scoring(_) => "SCORING_ERROR",
            VaultIntelError::Logging(_) => "LOGGING_ERROR",
            VaultIntelError::Io(_) => "IO_ERROR",
            VaultIntelError::Serialization(_) => "SERIALIZATION_ERROR",
            VaultIntelError::Other(_) => "OTHER_ERROR",
        };

        let error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

/// Color a `[0, 1]` score by band.
pub fn format_score(score: f64) -> ColoredString {
    let text = format!("{:.3}", score);
    if score >= 0.8 {
        text.color(CliColors::success()).bold()
    } else if score >= 0.6 {
        text.color(CliColors::success())
    } else if score >= 0.4 {
        text.color(CliColors::warning())
    } else {
        text.color(CliColors::muted())
    }
}

pub fn print_categorization(result: &CategorizationResult) {
    let status = if result.validation_passed {
        "passed".color(CliColors::success())
    } else {
        "failed".color(CliColors::error())
    };

    println!(
        "{} {} {} {}",
        result.item_id.color(CliColors::accent()).bold(),
        format!("[{}]", result.database_id).color(CliColors::muted()),
        "validation".color(CliColors::muted()),
        status
    );

    if result.assigned_categories.is_empty() {
        println!("  {}", "No categories assigned".color(CliColors::muted()));
    }
    for category in &result.assigned_categories {
        println!(
            "  {} {}",
            format_score(result.confidence(category)),
            category.color(CliColors::category())
        );
    }

    for line in &result.reasoning {
        println!("    {}", line.color(CliColors::muted()));
    }

    if !result.alternative_categories.is_empty() {
        println!(
            "  {}: {}",
            "Alternatives".color(CliColors::muted()),
            result.alternative_categories.join(", ")
        );
    }

    println!(
        "  {}: {}  {}: {:.2}ms",
        "Quality".color(CliColors::muted()),
        format_score(result.quality_score),
        "Time".color(CliColors::muted()),
        result.processing_time_ms
    );
}

pub fn print_categorization_list(results: &[CategorizationResult]) {
    if results.is_empty() {
        println!("{}", format_info("No items to categorize."));
        return;
    }

    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_categorization(result);
    }

    let passed = results.iter().filter(|r| r.validation_passed).count();
    println!();
    println!(
        "{}",
        format_success(&format!(
            "Categorized {} item(s), {} passed validation",
            results.len(),
            passed
        ))
    );
}

pub fn print_categorization_statistics(statistics: &CategorizationStatistics) {
    match statistics {
        CategorizationStatistics::NoHistory { message } => {
            println!("{}", format_info(message));
        }
        CategorizationStatistics::Report(report) => print_categorization_report(report),
    }
}

fn print_categorization_report(report: &CategorizationReport) {
    let summary = &report.performance_summary;
    println!(
        "{}",
        "━━━ Categorization Statistics ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}/{} ({:.1}%)",
        "Successful".color(CliColors::muted()),
        summary.successful_categorizations,
        summary.total_categorizations,
        summary.success_rate_percentage
    );
    println!(
        "{}: {:.2}ms",
        "Average time".color(CliColors::muted()),
        summary.average_processing_time_ms
    );
    println!(
        "{}: {}",
        "Average quality".color(CliColors::muted()),
        format_score(summary.average_quality_score)
    );
    println!(
        "{}: {:.2}",
        "Categories per item".color(CliColors::muted()),
        summary.average_categories_per_item
    );

    if !report.category_distribution.is_empty() {
        println!("{}:", "Top categories".color(CliColors::muted()));
        for entry in &report.category_distribution {
            println!(
                "  {:>4}  {}",
                entry.count,
                entry.category.color(CliColors::category())
            );
        }
    }

    let quality = &report.quality_metrics;
    println!(
        "{}: {} high, {} medium, {} low",
        "Quality".color(CliColors::muted()),
        quality.high_quality_results,
        quality.medium_quality_results,
        quality.low_quality_results
    );
}

pub fn print_relationship(relationship: &RelationshipResult) {
    let arrow = if relationship.bidirectional { "<->" } else { "->" };
    println!(
        "{} {}:{} {} {}:{}",
        format_score(relationship.strength_score),
        relationship.source_database.color(CliColors::muted()),
        relationship.source_item_id.color(CliColors::accent()),
        arrow,
        relationship.target_database.color(CliColors::muted()),
        relationship.target_item_id.color(CliColors::accent()),
    );
    println!(
        "      {} (confidence {:.3})",
        relationship.relationship_type.color(CliColors::category()),
        relationship.confidence_level
    );
    println!(
        "      {}",
        relationship.discovery_reason.color(CliColors::muted())
    );
}

pub fn print_relationship_list(relationships: &[RelationshipResult]) {
    if relationships.is_empty() {
        println!("{}", format_info("No relationships found."));
        return;
    }

    println!(
        "{}",
        format!("Found {} relationship(s):", relationships.len())
            .color(CliColors::accent())
            .bold()
    );
    for relationship in relationships {
        print_relationship(relationship);
    }
}

pub fn print_discovery_statistics(statistics: &DiscoveryStatistics) {
    let summary = &statistics.discovery_summary;
    println!(
        "{}",
        "━━━ Discovery Statistics ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {} from {} comparisons ({:.1}%)",
        "Relationships".color(CliColors::muted()),
        summary.total_relationships,
        summary.total_comparisons,
        summary.discovery_rate * 100.0
    );
    println!(
        "{}: {:.1}%",
        "Cache hit rate".color(CliColors::muted()),
        summary.cache_hit_rate * 100.0
    );

    let strength = &statistics.strength_distribution;
    println!(
        "{}: {} very strong, {} strong, {} moderate, {} weak",
        "Strength".color(CliColors::muted()),
        strength.very_strong,
        strength.strong,
        strength.moderate,
        strength.weak
    );

    for (relationship_type, count) in &statistics.relationship_type_distribution {
        println!(
            "  {:>4}  {}",
            count,
            relationship_type.color(CliColors::category())
        );
    }
}

pub fn print_cross_database_report(report: &CrossDatabaseReport) {
    let summary = &report.analysis_summary;
    println!(
        "{}",
        "━━━ Cross-Collection Analysis ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {} ({} strong)",
        "Relationships".color(CliColors::muted()),
        summary.total_relationships_discovered,
        summary.strong_relationships
    );
    println!(
        "{}: {} ({:.2} relationships per pair)",
        "Collection pairs".color(CliColors::muted()),
        summary.database_pairs_analyzed,
        summary.average_relationships_per_pair
    );
    println!(
        "{}: {} in {:.2}ms",
        "Items".color(CliColors::muted()),
        summary.total_items_analyzed,
        report.processing_time_ms
    );

    if !report.connectivity_matrix.is_empty() {
        println!();
        println!("{}", "Connectivity".color(CliColors::accent()));
        for (source, targets) in &report.connectivity_matrix {
            for (target, count) in targets {
                println!("  {} -> {}: {}", source, target, count);
            }
        }
    }

    if !report.top_relationships.is_empty() {
        println!();
        println!("{}", "Strongest relationships".color(CliColors::accent()));
        for top in &report.top_relationships {
            println!(
                "  {} {} -> {} {}",
                format_score(top.strength),
                top.source,
                top.target,
                top.relationship_type.color(CliColors::category())
            );
        }
    }

    println!();
    println!("{}", "Coverage".color(CliColors::accent()));
    for (database, coverage) in &report.database_coverage {
        println!(
            "  {}: {}/{} items related",
            database, coverage.items_with_relationships, coverage.total_items
        );
    }
}

pub fn print_config_summary(config: &IntelConfig) {
    println!("{}", format_success("Configuration is valid"));

    let categorization = &config.categorization;
    println!(
        "{}: {}",
        "Categories".color(CliColors::muted()),
        categorization.category_count()
    );
    for (name, definition) in &categorization.category_mapping.primary_categories {
        println!(
            "  {} (weight {:.2}, {} subcategories)",
            name.color(CliColors::category()),
            definition.weight,
            definition.subcategories.len()
        );
    }
    println!(
        "{}: {}",
        "Collection rules".color(CliColors::muted()),
        categorization
            .database_category_rules
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );

    let relationships = &config.relationships;
    println!(
        "{}: {}",
        "Relationship types".color(CliColors::muted()),
        relationships
            .relationship_types
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "{}: {}",
        "Cross-collection rules".color(CliColors::muted()),
        relationships.cross_database_rules.len()
    );
    println!(
        "{}: {:.2} minimum strength, {} per item",
        "Relationship limits".color(CliColors::muted()),
        relationships.validation_rules.minimum_relationship_strength,
        relationships.validation_rules.maximum_relationships_per_item
    );
    println!(
        "{}: history {}, similarity cache {}",
        "Store".color(CliColors::muted()),
        config.store.history_limit,
        config.store.similarity_cache_size
    );

    if categorization.category_count() == 0 {
        println!(
            "{}",
            format_warning("No categories configured; items will not be categorized")
        );
    }
}
