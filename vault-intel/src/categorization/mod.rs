//! Category assignment.
//!
//! An item is scored against every primary category, filtered through the
//! policy of its collection, and the strongest survivors are selected and
//! validated. See [`ContentCategorizer`].

mod categorizer;
pub mod feedback;
pub mod rules;
pub mod statistics;

pub use categorizer::ContentCategorizer;
pub use feedback::{FEEDBACK_STEP, Feedback, PatternUpdates};
pub use rules::{Selection, Validation, apply_database_rules, select_categories, validate_selection};
pub use statistics::{
    CategorizationReport, CategorizationStatistics, CategoryCount, PerformanceSummary,
    QualityMetrics,
};
