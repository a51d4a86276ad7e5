//! Cross-collection relationship discovery.
//!
//! Items of two collections are compared pairwise when a cross-database rule
//! covers the pair. Each applicable [`RelationshipKind`] is scored from the
//! items' similarity; edges that clear their type threshold and the global
//! strength floor are kept, strongest first, up to a per-item cap.

mod discovery;
pub mod metrics;
pub mod report;
pub mod types;
pub mod validation;

pub use discovery::{RelationshipDiscovery, StrengthUpdate};
pub use metrics::{
    DiscoveryStatistics, DiscoverySummary, RelationshipQualityMetrics, StrengthDistribution,
};
pub use report::{AnalysisSummary, CrossDatabaseReport, DatabaseCoverage, TopRelationship};
pub use types::RelationshipKind;
pub use validation::filter_relationships;
