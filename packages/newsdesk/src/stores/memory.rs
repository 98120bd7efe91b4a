//! In-memory storage implementation for testing and development.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::ArticleStore;
use crate::types::article::{ArticleRecord, CategoryUpdate};
use crate::types::verification::VerificationSnapshot;

/// An article plus everything the pipeline has written about it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredArticle {
    pub article: ArticleRecord,
    pub category_keywords: Vec<String>,
    pub category_updated_at: Option<DateTime<Utc>>,
    pub verification: Option<VerificationSnapshot>,
}

impl From<ArticleRecord> for StoredArticle {
    fn from(article: ArticleRecord) -> Self {
        Self {
            article,
            category_keywords: Vec::new(),
            category_updated_at: None,
            verification: None,
        }
    }
}

/// In-memory article store.
///
/// Articles are listed in insertion order. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<IndexMap<String, StoredArticle>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: impl IntoIterator<Item = ArticleRecord>) -> Self {
        let store = Self::new();
        for article in articles {
            store.insert(article);
        }
        store
    }

    /// Insert or replace an article, keeping its position on replace.
    pub fn insert(&self, article: ArticleRecord) {
        self.articles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(article.id.clone(), StoredArticle::from(article));
    }

    pub fn get(&self, id: &str) -> Option<StoredArticle> {
        self.articles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.articles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify(&self, id: &str, apply: impl FnOnce(&mut StoredArticle)) -> StoreResult<()> {
        let mut articles = self.articles.write().unwrap_or_else(PoisonError::into_inner);
        let stored = articles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        apply(stored);
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list_articles(&self) -> StoreResult<Vec<ArticleRecord>> {
        Ok(self
            .articles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|stored| stored.article.clone())
            .collect())
    }

    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> StoreResult<()> {
        self.modify(id, |stored| {
            stored.article.category = Some(update.category.clone());
            stored.category_keywords = update.keywords.clone();
            stored.category_updated_at = Some(update.updated_at);
        })
    }

    async fn save_verification(&self, id: &str, snapshot: &VerificationSnapshot) -> StoreResult<()> {
        self.modify(id, |stored| stored.verification = Some(snapshot.clone()))
    }
}
