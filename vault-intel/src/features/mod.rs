//! Feature extraction.
//!
//! Every scoring path works on a [`FeatureBag`], the normalized view of one
//! [`Item`]. Extraction is a pure function of the item.

pub mod tokenizer;
pub mod vocabulary;

pub use tokenizer::{STOPWORDS, tokenize, url_domain};
pub use vocabulary::{SemanticVector, VECTOR_DIMENSIONS, VOCABULARY};

use crate::models::Item;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Content fingerprint of an item, see [`fingerprint`].
pub type Fingerprint = [u8; 32];

/// Normalized features of one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureBag {
    pub title_lower: String,
    pub description_lower: String,
    pub url_lower: String,
    pub category_lower: String,

    /// Tags as given, order preserved
    pub tags: Vec<String>,
    /// Lower-cased tags, order preserved
    pub tags_lower: Vec<String>,
    /// Distinct lower-cased tags
    pub tag_set: BTreeSet<String>,

    pub title_tokens: Vec<String>,
    pub description_tokens: Vec<String>,
    pub url_domain: String,

    /// Description length in characters
    pub content_length: usize,
    /// Name length in characters
    pub title_length: usize,
    /// Number of tags as given
    pub tag_count: usize,

    /// Vocabulary presence over name and description tokens
    pub semantic_vector: SemanticVector,
}

impl FeatureBag {
    /// Extract features from an item.
    pub fn from_item(item: &Item) -> Self {
        let tags_lower: Vec<String> = item.tags.iter().map(|t| t.to_lowercase()).collect();
        let title_tokens = tokenize(&item.name);
        let description_tokens = tokenize(&item.description);
        let vector_tokens = tokenize(&format!("{} {}", item.name, item.description));

        Self {
            title_lower: item.name.to_lowercase(),
            description_lower: item.description.to_lowercase(),
            url_lower: item.url.to_lowercase(),
            category_lower: item.category.as_deref().unwrap_or_default().to_lowercase(),
            tags: item.tags.clone(),
            tag_set: tags_lower.iter().cloned().collect(),
            tags_lower,
            title_tokens,
            description_tokens,
            url_domain: url_domain(&item.url),
            content_length: item.description.chars().count(),
            title_length: item.name.chars().count(),
            tag_count: item.tags.len(),
            semantic_vector: SemanticVector::from_tokens(&vector_tokens),
        }
    }

    /// Distinct tokens of the title and the description.
    pub fn word_set(&self) -> BTreeSet<&str> {
        self.title_tokens
            .iter()
            .chain(self.description_tokens.iter())
            .map(String::as_str)
            .collect()
    }

    /// Whether `needle` is a substring of any lower-cased tag.
    pub fn any_tag_contains(&self, needle: &str) -> bool {
        self.tags_lower.iter().any(|tag| tag.contains(needle))
    }
}

/// SHA-256 over the fields that feed similarity scoring.
///
/// Two items with the same fingerprint produce identical feature bags for
/// similarity purposes, whatever their ids.
pub fn fingerprint(item: &Item) -> Fingerprint {
    let mut hasher = Sha256::new();
    for field in [&item.name, &item.description, &item.url] {
        hasher.update(field.as_bytes());
        hasher.update([0x1f]);
    }
    for tag in &item.tags {
        hasher.update(tag.as_bytes());
        hasher.update([0x1e]);
    }
    hasher.finalize().into()
}
