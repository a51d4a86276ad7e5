//! Strength filtering and per-item caps for discovered relationships.

use crate::config::RelationshipValidationRules;
use crate::models::RelationshipResult;
use std::collections::BTreeMap;

/// Drop edges weaker than the configured minimum, group the rest by source
/// key and keep the strongest `maximum_relationships_per_item` of each group.
///
/// Groups are ordered by strength, strongest first; the sort is stable, so
/// equally strong edges keep their discovery order.
pub fn filter_relationships(
    relationships: Vec<RelationshipResult>,
    rules: &RelationshipValidationRules,
) -> BTreeMap<String, Vec<RelationshipResult>> {
    let mut groups: BTreeMap<String, Vec<RelationshipResult>> = BTreeMap::new();

    for relationship in relationships
        .into_iter()
        .filter(|r| r.strength_score >= rules.minimum_relationship_strength)
    {
        groups
            .entry(relationship.source_key())
            .or_default()
            .push(relationship);
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| b.strength_score.total_cmp(&a.strength_score));
        group.truncate(rules.maximum_relationships_per_item);
    }

    groups
}
