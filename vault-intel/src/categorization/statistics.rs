//! Aggregate statistics over the categorization history.

use crate::models::CategorizationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Only this many categories are listed in the distribution.
const TOP_CATEGORIES: usize = 10;

const HIGH_QUALITY: f64 = 0.8;
const MEDIUM_QUALITY: f64 = 0.6;

/// Statistics over the categorization history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategorizationStatistics {
    /// Nothing has been categorized yet
    NoHistory { message: String },
    Report(Box<CategorizationReport>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizationReport {
    pub performance_summary: PerformanceSummary,
    /// Most frequent categories among successful results, most frequent first
    pub category_distribution: Vec<CategoryCount>,
    /// Results per collection, successful or not
    pub database_distribution: BTreeMap<String, usize>,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    pub total_categorizations: usize,
    pub successful_categorizations: usize,
    pub success_rate_percentage: f64,
    /// Over all results
    pub average_processing_time_ms: f64,
    /// Over successful results
    pub average_quality_score: f64,
    /// Over successful results
    pub average_categories_per_item: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Quality buckets of successful results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityMetrics {
    pub high_quality_results: usize,
    pub medium_quality_results: usize,
    pub low_quality_results: usize,
}

impl CategorizationStatistics {
    pub fn from_history(history: &[CategorizationResult]) -> Self {
        if history.is_empty() {
            return CategorizationStatistics::NoHistory {
                message: "No categorization history available".to_string(),
            };
        }

        let total = history.len();
        let successful: Vec<&CategorizationResult> =
            history.iter().filter(|r| r.validation_passed).collect();

        let mean_over_successful = |value: fn(&CategorizationResult) -> f64| {
            if successful.is_empty() {
                0.0
            } else {
                successful.iter().map(|r| value(r)).sum::<f64>() / successful.len() as f64
            }
        };

        let performance_summary = PerformanceSummary {
            total_categorizations: total,
            successful_categorizations: successful.len(),
            success_rate_percentage: successful.len() as f64 / total as f64 * 100.0,
            average_processing_time_ms: history.iter().map(|r| r.processing_time_ms).sum::<f64>()
                / total as f64,
            average_quality_score: mean_over_successful(|r| r.quality_score),
            average_categories_per_item: mean_over_successful(|r| r.assigned_categories.len() as f64),
        };

        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for result in &successful {
            for category in &result.assigned_categories {
                *category_counts.entry(category).or_default() += 1;
            }
        }
        let mut category_distribution: Vec<CategoryCount> = category_counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();
        // BTreeMap order makes the stable sort break ties by name
        category_distribution.sort_by(|a, b| b.count.cmp(&a.count));
        category_distribution.truncate(TOP_CATEGORIES);

        let mut database_distribution = BTreeMap::new();
        for result in history {
            *database_distribution
                .entry(result.database_id.clone())
                .or_default() += 1;
        }

        let mut quality_metrics = QualityMetrics::default();
        for result in &successful {
            if result.quality_score >= HIGH_QUALITY {
                quality_metrics.high_quality_results += 1;
            } else if result.quality_score >= MEDIUM_QUALITY {
                quality_metrics.medium_quality_results += 1;
            } else {
                quality_metrics.low_quality_results += 1;
            }
        }

        CategorizationStatistics::Report(Box::new(CategorizationReport {
            performance_summary,
            category_distribution,
            database_distribution,
            quality_metrics,
        }))
    }

    /// The report, unless the history was empty.
    pub fn report(&self) -> Option<&CategorizationReport> {
        match self {
            CategorizationStatistics::Report(report) => Some(report),
            CategorizationStatistics::NoHistory { .. } => None,
        }
    }
}
