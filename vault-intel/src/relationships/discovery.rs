//! Relationship discovery across collections.

use super::metrics::DiscoveryStatistics;
use super::report::CrossDatabaseReport;
use super::types::RelationshipKind;
use super::validation::filter_relationships;
use crate::analysis::SimilarityAnalyzer;
use crate::config::RelationshipConfig;
use crate::features::{FeatureBag, Fingerprint, fingerprint};
use crate::models::{Item, RelationshipResult, SimilarityAnalysis, item_key};
use crate::reasoning::discovery_reason;
use crate::scoring::{self, RelationshipScorer, clamp_unit, ensure_database_id};
use crate::store::{DiscoveryMetrics, RelationshipStore, SimilarityKey};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A manual correction of a stored edge's strength.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrengthUpdate {
    pub source_item_id: String,
    pub source_database: String,
    pub target_item_id: String,
    pub target_database: String,
    pub new_strength: f64,
    pub reason: String,
}

impl StrengthUpdate {
    pub fn new(
        source_database: impl Into<String>,
        source_item_id: impl Into<String>,
        target_database: impl Into<String>,
        target_item_id: impl Into<String>,
        new_strength: f64,
    ) -> Self {
        Self {
            source_item_id: source_item_id.into(),
            source_database: source_database.into(),
            target_item_id: target_item_id.into(),
            target_database: target_database.into(),
            new_strength,
            reason: "manual_update".to_string(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Discovers edges between items of different collections.
///
/// Like the categorizer, the discovery engine holds only configuration.
/// Discovered edges, cached similarities and counters go to the
/// [`RelationshipStore`] passed to each call.
#[derive(Debug, Clone)]
pub struct RelationshipDiscovery {
    config: RelationshipConfig,
    analyzer: SimilarityAnalyzer,
    scorer: RelationshipScorer,
}

impl RelationshipDiscovery {
    pub fn new(config: RelationshipConfig) -> Self {
        Self {
            analyzer: SimilarityAnalyzer::new(config.semantic_similarity.text_analysis),
            scorer: RelationshipScorer::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    /// Relationship types scored between two collections, `None` when no
    /// rule covers the pair in either direction. A rule listing no types
    /// scores nothing.
    pub fn applicable_types(&self, source_db: &str, target_db: &str) -> Option<Vec<RelationshipKind>> {
        let rule = self.config.rule_for(source_db, target_db)?;
        Some(
            rule.relationship_types
                .iter()
                .map(|name| RelationshipKind::from(name.as_str()))
                .collect(),
        )
    }

    /// Compare a source item against candidate targets.
    ///
    /// A target's collection is its own `database_id`, or else the first of
    /// `target_databases`; targets with neither are skipped. The retained
    /// edges are merged into the store under the source key and returned,
    /// strongest first. Errors are logged and yield no edges.
    pub fn discover_relationships<S>(
        &self,
        source: &Item,
        source_database: &str,
        targets: &[Item],
        target_databases: &[String],
        store: &mut S,
    ) -> Vec<RelationshipResult>
    where
        S: RelationshipStore + ?Sized,
    {
        let start = Instant::now();
        debug!(
            "Discovering relationships for {} against {} targets",
            source.id,
            targets.len()
        );

        let mut metrics = DiscoveryMetrics::default();
        let discovered = match self.compare_targets(
            source,
            source_database,
            targets,
            target_databases,
            store,
            &mut metrics,
        ) {
            Ok(discovered) => discovered,
            Err(e) => {
                error!("Error discovering relationships for {}: {}", source.id, e);
                return Vec::new();
            }
        };

        let limit = self.config.validation_rules.maximum_relationships_per_item;
        let mut validated = Vec::new();
        for (source_key, group) in filter_relationships(discovered, &self.config.validation_rules) {
            validated.extend(group.iter().cloned());
            store.merge_relationships(&source_key, group, limit);
        }

        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics.relationships_discovered = validated.len() as u64;
        metrics.processing_time_total_ms = processing_time_ms;
        store.add_discovery_metrics(&metrics);

        debug!(
            "Discovered {} relationships for {} ({:.1}ms)",
            validated.len(),
            source.id,
            processing_time_ms
        );

        validated
    }

    /// Discover edges between every pair of collections.
    ///
    /// Pairs are visited once, in key order, with the earlier collection as
    /// the source side. Each side is capped at `max_items_per_database`.
    pub fn analyze_cross_database<S>(
        &self,
        items_by_database: &BTreeMap<String, Vec<Item>>,
        store: &mut S,
    ) -> CrossDatabaseReport
    where
        S: RelationshipStore + ?Sized,
    {
        info!(
            "Analyzing cross-database relationships across {} databases",
            items_by_database.len()
        );
        let start = Instant::now();

        let cap = self.config.analysis.max_items_per_database;
        let mut all_relationships = Vec::new();
        let mut pairs_analyzed = 0;

        for (i, (source_db, source_items)) in items_by_database.iter().enumerate() {
            for (target_db, target_items) in items_by_database.iter().skip(i + 1) {
                pairs_analyzed += 1;
                debug!(
                    "Analyzing {} <-> {} ({} x {})",
                    source_db,
                    target_db,
                    source_items.len(),
                    target_items.len()
                );

                let targets = &target_items[..target_items.len().min(cap)];
                let target_databases = [target_db.clone()];
                for source in source_items.iter().take(cap) {
                    all_relationships.extend(self.discover_relationships(
                        source,
                        source_db,
                        targets,
                        &target_databases,
                        store,
                    ));
                }
            }
        }

        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "Cross-database analysis completed: {} relationships across {} database pairs ({:.1}ms)",
            all_relationships.len(),
            pairs_analyzed,
            processing_time_ms
        );

        CrossDatabaseReport::build(
            &all_relationships,
            items_by_database,
            pairs_analyzed,
            self.config.analysis.top_relationships,
            processing_time_ms,
        )
    }

    /// Stored edges of an item, optionally restricted to some types. An
    /// empty type list means no restriction.
    pub fn get_item_relationships<S>(
        &self,
        item_id: &str,
        database_id: &str,
        types: Option<&[RelationshipKind]>,
        store: &S,
    ) -> Vec<RelationshipResult>
    where
        S: RelationshipStore + ?Sized,
    {
        let relationships = store.relationships(&item_key(database_id, item_id));

        match types {
            Some(types) if !types.is_empty() => relationships
                .into_iter()
                .filter(|r| types.iter().any(|t| t.as_str() == r.relationship_type))
                .collect(),
            _ => relationships,
        }
    }

    /// Overwrite the strength of the first stored edge from the source to
    /// the target. Returns whether such an edge was found.
    pub fn update_relationship_strength<S>(&self, update: &StrengthUpdate, store: &mut S) -> bool
    where
        S: RelationshipStore + ?Sized,
    {
        if !update.new_strength.is_finite() {
            warn!(
                "Rejected non-finite strength for {}->{}",
                update.source_item_id, update.target_item_id
            );
            return false;
        }

        let source_key = item_key(&update.source_database, &update.source_item_id);
        let edge = store.relationships_mut(&source_key).and_then(|edges| {
            edges.iter_mut().find(|r| {
                r.target_item_id == update.target_item_id
                    && r.target_database == update.target_database
            })
        });

        match edge {
            Some(edge) => {
                let old_strength = edge.strength_score;
                edge.strength_score = clamp_unit(update.new_strength);
                edge.discovery_reason
                    .push_str(&format!("; Updated: {}", update.reason));
                info!(
                    "Updated relationship strength {}->{}: {:.2} -> {:.2}",
                    update.source_item_id,
                    update.target_item_id,
                    old_strength,
                    edge.strength_score
                );
                true
            }
            None => {
                warn!(
                    "Relationship not found for update: {}->{}",
                    update.source_item_id, update.target_item_id
                );
                false
            }
        }
    }

    /// Statistics over everything the store holds.
    pub fn statistics<S>(&self, store: &S) -> DiscoveryStatistics
    where
        S: RelationshipStore + ?Sized,
    {
        DiscoveryStatistics::new(&store.all_relationships(), &store.discovery_metrics())
    }

    /// Score every applicable target, before strength filtering.
    fn compare_targets<S>(
        &self,
        source: &Item,
        source_database: &str,
        targets: &[Item],
        target_databases: &[String],
        store: &mut S,
        metrics: &mut DiscoveryMetrics,
    ) -> scoring::Result<Vec<RelationshipResult>>
    where
        S: RelationshipStore + ?Sized,
    {
        ensure_database_id(source_database)?;

        let source_features = FeatureBag::from_item(source);
        let source_fingerprint = fingerprint(source);
        let fallback_database = target_databases
            .first()
            .map(String::as_str)
            .filter(|db| !db.is_empty());

        let mut discovered = Vec::new();
        let mut fallbacks = 0usize;

        for target in targets {
            let target_database = match (target.database(), fallback_database) {
                (Some(db), _) => db,
                (None, Some(db)) => {
                    fallbacks += 1;
                    db
                }
                (None, None) => continue,
            };

            if source.id == target.id && source_database == target_database {
                continue;
            }

            let Some(kinds) = self.applicable_types(source_database, target_database) else {
                continue;
            };

            let similarity =
                self.similarity(&source_features, source_fingerprint, target, store, metrics);

            for kind in &kinds {
                let Some(scored) = self.scorer.score(kind, &similarity)? else {
                    continue;
                };

                discovered.push(RelationshipResult {
                    source_item_id: source.id.clone(),
                    source_database: source_database.to_string(),
                    target_item_id: target.id.clone(),
                    target_database: target_database.to_string(),
                    relationship_type: scored.kind.to_string(),
                    strength_score: scored.strength,
                    confidence_level: scored.confidence,
                    discovery_reason: discovery_reason(&similarity, kind, scored.strength),
                    bidirectional: scored.bidirectional,
                    validation_passed: true,
                    created_timestamp: Utc::now(),
                });
            }

            metrics.total_comparisons += 1;
        }

        if fallbacks > 0 {
            warn!(
                "{} targets of {} had no collection id and were assumed to belong to {}",
                fallbacks,
                source.id,
                fallback_database.unwrap_or_default()
            );
        }

        Ok(discovered)
    }

    fn similarity<S>(
        &self,
        source_features: &FeatureBag,
        source_fingerprint: Fingerprint,
        target: &Item,
        store: &mut S,
        metrics: &mut DiscoveryMetrics,
    ) -> SimilarityAnalysis
    where
        S: RelationshipStore + ?Sized,
    {
        let key = SimilarityKey::new(source_fingerprint, fingerprint(target), &self.analyzer.weights());
        if let Some(cached) = store.cached_similarity(&key) {
            metrics.cache_hits += 1;
            return cached;
        }

        let analysis = self
            .analyzer
            .analyze(source_features, &FeatureBag::from_item(target));
        store.cache_similarity(key, analysis.clone());
        analysis
    }
}
