//! Performance benchmarks for categorization and relationship discovery
//!
//! Run with: cargo bench --bench scoring_benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeMap;
use vault_intel::analysis::SimilarityAnalyzer;
use vault_intel::config::{ConfigBuilder, IntelConfig};
use vault_intel::features::FeatureBag;
use vault_intel::models::Item;
use vault_intel::prelude::*;

const TOPICS: &[(&str, &str, &[&str])] = &[
    (
        "React component framework",
        "JavaScript library for building user interfaces with reusable components",
        &["javascript", "frontend"],
    ),
    (
        "Team workflow planner",
        "Notes, planning and task automation for small teams",
        &["productivity", "notes"],
    ),
    (
        "Model training platform",
        "Machine learning model training and inference with managed GPUs",
        &["ai", "machine learning"],
    ),
    (
        "Startup growth playbook",
        "Customer acquisition, sales strategy and revenue growth for startups",
        &["business", "startup"],
    ),
    (
        "Systems programming course",
        "Tutorial and book to learn Rust programming",
        &["learning", "rust"],
    ),
];

/// Create a deterministic item for benchmarking
fn create_bench_item(index: usize) -> Item {
    let (name, description, tags) = TOPICS[index % TOPICS.len()];
    Item::new(format!("item-{}", index), format!("{} {}", name, index))
        .with_description(description)
        .with_url(format!("https://example.com/{}", index))
        .with_tags(tags.iter().copied())
}

fn bench_config() -> IntelConfig {
    ConfigBuilder::knowledge_vault()
        .build()
        .expect("preset configuration is valid")
}

// =============================================================================
// Categorization
// =============================================================================

fn bench_categorization(c: &mut Criterion) {
    let config = bench_config();
    let categorizer = ContentCategorizer::new(config.categorization.clone());
    let item = create_bench_item(0);

    let mut group = c.benchmark_group("categorization");

    group.bench_function("single_item", |b| {
        b.iter(|| categorizer.categorize(black_box(&item), black_box("knowledge_vault")))
    });

    for size in [10, 100, 1000] {
        let items: Vec<Item> = (0..size).map(create_bench_item).collect();

        group.bench_with_input(BenchmarkId::new("batch", size), &items, |b, items| {
            b.iter(|| {
                let mut store = NoopStore;
                categorizer.batch_categorize(items, "knowledge_vault", &mut store)
            })
        });

        group.bench_with_input(BenchmarkId::new("par_batch", size), &items, |b, items| {
            b.iter(|| {
                let mut store = NoopStore;
                categorizer.par_batch_categorize(items, "knowledge_vault", &mut store)
            })
        });
    }

    group.finish();
}

// =============================================================================
// Similarity
// =============================================================================

fn bench_similarity(c: &mut Criterion) {
    let analyzer = SimilarityAnalyzer::default();
    let source = FeatureBag::from_item(&create_bench_item(0));
    let target = FeatureBag::from_item(&create_bench_item(5));

    c.bench_function("feature_extraction", |b| {
        let item = create_bench_item(2);
        b.iter(|| FeatureBag::from_item(black_box(&item)))
    });

    c.bench_function("similarity_analysis", |b| {
        b.iter(|| analyzer.analyze(black_box(&source), black_box(&target)))
    });
}

// =============================================================================
// Cross-collection analysis
// =============================================================================

fn bench_cross_database(c: &mut Criterion) {
    let config = bench_config();
    let discovery = RelationshipDiscovery::new(config.relationships.clone());

    let mut group = c.benchmark_group("cross_database");
    group.sample_size(20);

    for size in [10, 50] {
        let items_by_database: BTreeMap<String, Vec<Item>> =
            ["knowledge_vault", "notes_ideas", "learning_resources"]
                .iter()
                .map(|db| (db.to_string(), (0..size).map(create_bench_item).collect()))
                .collect();

        group.bench_with_input(
            BenchmarkId::new("cold_cache", size),
            &items_by_database,
            |b, items| {
                b.iter(|| {
                    let mut store = InMemoryStore::new(&config.store);
                    discovery.analyze_cross_database(items, &mut store)
                })
            },
        );

        let mut warm_store = InMemoryStore::new(&config.store);
        discovery.analyze_cross_database(&items_by_database, &mut warm_store);
        group.bench_with_input(
            BenchmarkId::new("warm_cache", size),
            &items_by_database,
            |b, items| b.iter(|| discovery.analyze_cross_database(items, &mut warm_store)),
        );
    }

    group.finish();
}

// =============================================================================
// Benchmark Group Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_categorization,
    bench_similarity,
    bench_cross_database,
);

criterion_main!(benches);
