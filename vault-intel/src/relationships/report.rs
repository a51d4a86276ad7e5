//! Aggregate report of a cross-collection analysis run.

use crate::models::{Item, RelationshipResult, item_key};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Edges at least this strong count as strong in the summary.
const STRONG_RELATIONSHIP: f64 = 0.8;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrossDatabaseReport {
    pub analysis_summary: AnalysisSummary,
    /// `source_database -> target_database -> edge count`
    pub connectivity_matrix: BTreeMap<String, BTreeMap<String, usize>>,
    /// Strongest edges, strongest first
    pub top_relationships: Vec<TopRelationship>,
    pub relationship_type_distribution: BTreeMap<String, usize>,
    pub database_coverage: BTreeMap<String, DatabaseCoverage>,
    pub processing_time_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSummary {
    pub total_relationships_discovered: usize,
    pub strong_relationships: usize,
    pub database_pairs_analyzed: usize,
    pub average_relationships_per_pair: f64,
    /// Items supplied across all collections, before any cap
    pub total_items_analyzed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopRelationship {
    /// `"{database}:{id}"`
    pub source: String,
    /// `"{database}:{id}"`
    pub target: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub strength: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseCoverage {
    pub total_items: usize,
    /// Distinct items of the collection that are the source of an edge
    pub items_with_relationships: usize,
}

impl CrossDatabaseReport {
    /// Aggregate the edges discovered in one run.
    pub fn build(
        relationships: &[RelationshipResult],
        items_by_database: &BTreeMap<String, Vec<Item>>,
        pairs_analyzed: usize,
        top_relationships: usize,
        processing_time_ms: f64,
    ) -> Self {
        let total = relationships.len();

        let mut connectivity_matrix: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        let mut relationship_type_distribution = BTreeMap::new();
        let mut sources: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        for relationship in relationships {
            *connectivity_matrix
                .entry(relationship.source_database.clone())
                .or_default()
                .entry(relationship.target_database.clone())
                .or_default() += 1;

            *relationship_type_distribution
                .entry(relationship.relationship_type.clone())
                .or_default() += 1;

            sources
                .entry(&relationship.source_database)
                .or_default()
                .insert(&relationship.source_item_id);
        }

        let mut ranked: Vec<&RelationshipResult> = relationships.iter().collect();
        ranked.sort_by(|a, b| b.strength_score.total_cmp(&a.strength_score));

        let database_coverage = items_by_database
            .iter()
            .map(|(database, items)| {
                let coverage = DatabaseCoverage {
                    total_items: items.len(),
                    items_with_relationships: sources
                        .get(database.as_str())
                        .map_or(0, BTreeSet::len),
                };
                (database.clone(), coverage)
            })
            .collect();

        CrossDatabaseReport {
            analysis_summary: AnalysisSummary {
                total_relationships_discovered: total,
                strong_relationships: relationships
                    .iter()
                    .filter(|r| r.strength_score >= STRONG_RELATIONSHIP)
                    .count(),
                database_pairs_analyzed: pairs_analyzed,
                average_relationships_per_pair: total as f64 / pairs_analyzed.max(1) as f64,
                total_items_analyzed: items_by_database.values().map(Vec::len).sum(),
            },
            connectivity_matrix,
            top_relationships: ranked
                .into_iter()
                .take(top_relationships)
                .map(|r| TopRelationship {
                    source: item_key(&r.source_database, &r.source_item_id),
                    target: item_key(&r.target_database, &r.target_item_id),
                    relationship_type: r.relationship_type.clone(),
                    strength: r.strength_score,
                    reason: r.discovery_reason.clone(),
                })
                .collect(),
            relationship_type_distribution,
            database_coverage,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn edge(source_db: &str, source: &str, target_db: &str, target: &str, strength: f64) -> RelationshipResult {
        RelationshipResult {
            source_item_id: source.to_string(),
            source_database: source_db.to_string(),
            target_item_id: target.to_string(),
            target_database: target_db.to_string(),
            relationship_type: "tag_overlap".to_string(),
            strength_score: strength,
            confidence_level: strength,
            discovery_reason: "Tag Overlap: Shared tags: ai".to_string(),
            bidirectional: true,
            validation_passed: true,
            created_timestamp: Utc::now(),
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (0..n).map(|i| Item::new(format!("i{}", i), "x")).collect()
    }

    #[test]
    fn test_report_aggregates() {
        let relationships = vec![
            edge("business_ideas", "b1", "tools_services", "t1", 0.7),
            edge("business_ideas", "b1", "tools_services", "t2", 0.9),
            edge("business_ideas", "b2", "tools_services", "t1", 0.82),
        ];
        let items_by_database: BTreeMap<String, Vec<Item>> = [
            ("business_ideas".to_string(), items(3)),
            ("tools_services".to_string(), items(2)),
        ]
        .into_iter()
        .collect();

        let report = CrossDatabaseReport::build(&relationships, &items_by_database, 1, 2, 12.5);

        let summary = &report.analysis_summary;
        assert_eq!(summary.total_relationships_discovered, 3);
        assert_eq!(summary.strong_relationships, 2);
        assert_eq!(summary.average_relationships_per_pair, 3.0);
        assert_eq!(summary.total_items_analyzed, 5);

        assert_eq!(report.connectivity_matrix["business_ideas"]["tools_services"], 3);
        assert_eq!(report.top_relationships.len(), 2);
        assert_eq!(report.top_relationships[0].target, "tools_services:t2");
        assert_eq!(report.top_relationships[1].source, "business_ideas:b2");
        assert_eq!(report.relationship_type_distribution["tag_overlap"], 3);
        assert_eq!(
            report.database_coverage["business_ideas"],
            DatabaseCoverage {
                total_items: 3,
                items_with_relationships: 2,
            }
        );
        assert_eq!(report.database_coverage["tools_services"].items_with_relationships, 0);
        assert_eq!(report.processing_time_ms, 12.5);
    }

    #[test]
    fn test_top_relationship_serializes_type() {
        let report = CrossDatabaseReport::build(
            &[edge("a", "1", "b", "2", 0.9)],
            &BTreeMap::new(),
            0,
            10,
            0.0,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top_relationships"][0]["type"], "tag_overlap");
        assert_eq!(json["analysis_summary"]["average_relationships_per_pair"], 1.0);
    }
}
