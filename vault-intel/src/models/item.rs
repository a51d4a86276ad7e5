//! Content item model consumed by the scoring engine

use serde::{Deserialize, Serialize};

/// A content item as stored in one of the vault collections.
///
/// Items are read-only inputs. Missing string fields deserialize to empty
/// strings and a missing id becomes `"unknown"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Item {
    /// Identifier unique within the item's collection
    pub id: String,

    /// Display name, used as the item's title
    #[serde(alias = "title")]
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Source URL, if any
    pub url: String,

    /// Tags already attached to the item
    pub tags: Vec<String>,

    /// Category recorded by the source collection, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Collection the item belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: "unknown".to_string(),
            name: String::new(),
            description: String::new(),
            url: String::new(),
            tags: Vec::new(),
            category: None,
            database_id: None,
        }
    }
}

impl Item {
    /// Create an item with an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Replace the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the category recorded by the source collection
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the owning collection
    pub fn with_database(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Owning collection, if recorded and non-empty
    pub fn database(&self) -> Option<&str> {
        self.database_id.as_deref().filter(|db| !db.is_empty())
    }
}
