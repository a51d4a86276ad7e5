//! Domain models for content items and scoring results

pub mod item;
pub mod results;

pub use item::Item;
pub use results::{
    CategorizationResult, CategoryAnalysis, RelationshipResult, SharedElements,
    SimilarityAnalysis, StrengthFactors, item_key,
};
