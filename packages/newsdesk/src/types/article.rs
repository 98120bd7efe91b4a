//! Article records as seen by the pipeline.
//!
//! Only the fields the classifier and verifier need are modelled; the
//! storage collaborator owns the full schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An article as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Store key.
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Short identifier (URL slug).
    #[serde(default)]
    pub slug: String,

    /// Body text (HTML or markdown, matched as plain text).
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Stored category label, if any.
    #[serde(default)]
    pub category: Option<String>,
}

impl ArticleRecord {
    /// Create a record with an id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Stored label, or `fallback` when the record has none.
    pub fn stored_category<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => fallback,
        }
    }
}

/// Category write-back for a single article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    /// Title Case label.
    pub category: String,

    /// Strongest contributing keywords (at most five).
    pub keywords: Vec<String>,

    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_category_falls_back_when_missing_or_blank() {
        let bare = ArticleRecord::new("a1", "Title");
        assert_eq!(bare.stored_category("News"), "News");

        let blank = ArticleRecord::new("a2", "Title").with_category("  ");
        assert_eq!(blank.stored_category("News"), "News");

        let set = ArticleRecord::new("a3", "Title").with_category("Sports");
        assert_eq!(set.stored_category("News"), "Sports");
    }

    #[test]
    fn test_deserializes_sparse_document() {
        let record: ArticleRecord =
            serde_json::from_str(r#"{"id": "x", "title": "Hello"}"#).unwrap();
        assert!(record.tags.is_empty());
        assert!(record.category.is_none());
        assert!(record.content.is_empty());
    }
}
