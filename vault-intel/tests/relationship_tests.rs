//! Integration tests for relationship discovery
//!
//! These tests cover:
//! - Similarity for the identical-tags / disjoint-text example
//! - Discovery across collection pairs with the knowledge vault rules
//! - Cross-collection reports, statistics and manual strength updates

use std::collections::BTreeMap;
use vault_intel::analysis::SimilarityAnalyzer;
use vault_intel::config::RelationshipTypeConfig;
use vault_intel::prelude::*;
use vault_intel::relationships::StrengthUpdate;

fn tool(id: &str, name: &str, description: &str, tags: &[&str]) -> Item {
    Item::new(id, name)
        .with_description(description)
        .with_tags(tags.iter().copied())
}

fn vault_discovery() -> RelationshipDiscovery {
    RelationshipDiscovery::new(ConfigBuilder::knowledge_vault().build().unwrap().relationships)
}

#[test]
fn test_identical_tags_disjoint_text() {
    let a = FeatureBag::from_item(&tool(
        "a",
        "Kanban boards",
        "Organize cards in columns",
        &["ai", "search", "teams"],
    ));
    let b = FeatureBag::from_item(&tool(
        "b",
        "Weather station",
        "Measures rainfall hourly",
        &["teams", "search", "ai"],
    ));

    let similarity = SimilarityAnalyzer::default().analyze(&a, &b);

    assert_eq!(similarity.tag_overlap_score, 1.0);
    assert_eq!(similarity.content_similarity, 0.0);
    assert_eq!(similarity.semantic_similarity, 0.0);
    assert!((similarity.overall_similarity - 0.2).abs() < 1e-9);
    assert_eq!(similarity.shared_elements.tags, vec!["ai", "search", "teams"]);
}

#[test]
fn test_cross_collection_discovery() {
    let discovery = vault_discovery();
    let mut store = InMemoryStore::default();

    let source = tool(
        "idea-1",
        "Automated invoicing",
        "Invoices generated from project data",
        &["finance", "automation", "invoices"],
    );
    let targets = vec![
        tool("tool-1", "Invoice service", "Generates invoices", &["finance", "automation", "invoices"])
            .with_database("tools_services"),
        tool("tool-2", "Photo editor", "Edit images", &["design"]).with_database("tools_services"),
    ];

    let found = discovery.discover_relationships(
        &source,
        "business_ideas",
        &targets,
        &["tools_services".to_string()],
        &mut store,
    );

    assert!(!found.is_empty());
    assert!(found.iter().all(|r| r.target_item_id == "tool-1"));
    assert!(found.iter().any(|r| r.relationship_type == "tag_overlap"));
    for window in found.windows(2) {
        assert!(window[0].strength_score >= window[1].strength_score);
    }
    for edge in &found {
        assert!(edge.strength_score >= 0.6);
        assert!((0.0..=1.0).contains(&edge.confidence_level));
        assert!(edge.validation_passed);
    }

    let stored = discovery.get_item_relationships("idea-1", "business_ideas", None, &store);
    assert_eq!(stored, found);
}

#[test]
fn test_relationship_cap() {
    let config = ConfigBuilder::knowledge_vault()
        .with_max_relationships_per_item(3)
        .build()
        .unwrap();
    let discovery = RelationshipDiscovery::new(config.relationships);
    let mut store = InMemoryStore::default();

    let source = tool("note-1", "Reading list", "Books to read", &["books", "reading", "ai", "ml"]);
    let targets: Vec<Item> = (0..8)
        .map(|i| {
            let tags: Vec<&str> = ["books", "reading", "ai", "ml"][..1 + i % 4].to_vec();
            tool(&format!("kv-{}", i), "Entry", "Unrelated text", &tags)
        })
        .collect();

    let found = discovery.discover_relationships(
        &source,
        "notes_ideas",
        &targets,
        &["knowledge_vault".to_string()],
        &mut store,
    );

    // tag overlap of 1.0 (twice) and 0.75 (twice) clear the thresholds
    let strengths: Vec<f64> = found.iter().map(|r| r.strength_score).collect();
    assert_eq!(strengths, vec![1.0, 1.0, 0.75]);
    assert_eq!(store.relationships("notes_ideas:note-1").len(), found.len());
}

#[test]
fn test_custom_relationship_type() {
    let config = ConfigBuilder::new()
        .with_relationship_type(
            "inspired_by",
            RelationshipTypeConfig {
                threshold: 0.1,
                weight: 1.0,
                bidirectional: false,
            },
        )
        .with_cross_database_rule("notes_ideas", "knowledge_vault", ["inspired_by"])
        .with_minimum_relationship_strength(0.1)
        .build()
        .unwrap();
    let discovery = RelationshipDiscovery::new(config.relationships);
    let mut store = InMemoryStore::default();

    let found = discovery.discover_relationships(
        &tool("n1", "Python data notes", "pandas tricks", &["python"]),
        "notes_ideas",
        &[tool("k1", "Python data guide", "pandas reference", &["python"]).with_database("knowledge_vault")],
        &[],
        &mut store,
    );

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].relationship_type, "inspired_by");
    assert!(!found[0].bidirectional);
    assert!(found[0].discovery_reason.starts_with("Inspired By: "));
}

#[test]
fn test_analyze_cross_database() {
    let discovery = vault_discovery();
    let mut store = InMemoryStore::default();

    let shared = ["ai", "python", "learning"];
    let mut items_by_database = BTreeMap::new();
    items_by_database.insert(
        "knowledge_vault".to_string(),
        vec![
            tool(
                "kv-1",
                "Python machine learning",
                "Notes on python machine learning",
                &shared,
            ),
            tool("kv-2", "Gardening", "Tomatoes", &["garden"]),
        ],
    );
    items_by_database.insert(
        "learning_resources".to_string(),
        vec![tool(
            "lr-1",
            "Python machine learning course",
            "Lessons on python machine learning",
            &shared,
        )],
    );
    items_by_database.insert(
        "tools_services".to_string(),
        vec![tool("ts-1", "Hosting", "Servers", &["cloud"])],
    );

    let report = discovery.analyze_cross_database(&items_by_database, &mut store);

    let summary = &report.analysis_summary;
    assert_eq!(summary.database_pairs_analyzed, 3);
    assert_eq!(summary.total_items_analyzed, 4);
    assert!(summary.total_relationships_discovered >= 1);
    assert_eq!(
        report.connectivity_matrix["knowledge_vault"]["learning_resources"],
        summary.total_relationships_discovered
    );
    assert_eq!(report.top_relationships[0].source, "knowledge_vault:kv-1");
    assert_eq!(report.top_relationships[0].target, "learning_resources:lr-1");
    assert_eq!(report.database_coverage["knowledge_vault"].items_with_relationships, 1);
    assert_eq!(report.database_coverage["learning_resources"].items_with_relationships, 0);

    let stats = discovery.statistics(&store);
    assert_eq!(
        stats.discovery_summary.total_relationships,
        summary.total_relationships_discovered
    );
    // kv-1 and kv-2 against lr-1; tools_services pairs have no rule
    assert_eq!(stats.discovery_summary.total_comparisons, 2);
}

#[test]
fn test_item_cap_in_cross_database_analysis() {
    let config = ConfigBuilder::knowledge_vault()
        .with_max_items_per_database(2)
        .build()
        .unwrap();
    let discovery = RelationshipDiscovery::new(config.relationships);
    let mut store = InMemoryStore::default();

    let items = |prefix: &str| -> Vec<Item> {
        (0..5)
            .map(|i| tool(&format!("{}-{}", prefix, i), "Entry", "Text", &["shared"]))
            .collect()
    };
    let mut items_by_database = BTreeMap::new();
    items_by_database.insert("notes_ideas".to_string(), items("n"));
    items_by_database.insert("knowledge_vault".to_string(), items("k"));

    let report = discovery.analyze_cross_database(&items_by_database, &mut store);

    assert_eq!(report.analysis_summary.total_items_analyzed, 10);
    assert_eq!(store.discovery_metrics().total_comparisons, 4);
}

#[test]
fn test_repeated_analysis_hits_cache_and_keeps_results() {
    let discovery = vault_discovery();
    let mut store = InMemoryStore::default();

    let mut items_by_database = BTreeMap::new();
    items_by_database.insert(
        "notes_ideas".to_string(),
        vec![tool("n1", "Rust notes", "Ownership", &["rust", "systems"])],
    );
    items_by_database.insert(
        "knowledge_vault".to_string(),
        vec![tool("k1", "Rust book", "Borrowing", &["rust", "systems"])],
    );

    let first = discovery.analyze_cross_database(&items_by_database, &mut store);
    let second = discovery.analyze_cross_database(&items_by_database, &mut store);

    assert_eq!(store.discovery_metrics().cache_hits, 1);
    assert_eq!(first.analysis_summary, second.analysis_summary);
    assert_eq!(
        store.relationships("knowledge_vault:k1").len(),
        first.analysis_summary.total_relationships_discovered
    );
}

#[test]
fn test_update_strength_through_public_api() {
    let discovery = vault_discovery();
    let mut store = InMemoryStore::default();

    discovery.discover_relationships(
        &tool("n1", "Rust notes", "Ownership", &["rust", "systems"]),
        "notes_ideas",
        &[tool("k1", "Rust book", "Borrowing", &["rust", "systems"])],
        &["knowledge_vault".to_string()],
        &mut store,
    );

    let update = StrengthUpdate::new("notes_ideas", "n1", "knowledge_vault", "k1", 0.65);
    assert!(discovery.update_relationship_strength(&update, &mut store));

    let edges = discovery.get_item_relationships("n1", "notes_ideas", None, &store);
    assert_eq!(edges[0].strength_score, 0.65);
    assert!(edges[0].discovery_reason.ends_with("; Updated: manual_update"));
}
