//! Article storage trait.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::types::article::{ArticleRecord, CategoryUpdate};
use crate::types::verification::VerificationSnapshot;

/// Keyed document store holding articles.
///
/// The pipeline reads article text and writes classification and
/// verification results; everything else about the schema belongs to
/// the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Every article, in a stable order.
    async fn list_articles(&self) -> StoreResult<Vec<ArticleRecord>>;

    /// Write a new category label.
    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> StoreResult<()>;

    /// Write a verification snapshot.
    async fn save_verification(&self, id: &str, snapshot: &VerificationSnapshot) -> StoreResult<()>;

    /// Cheap reachability check.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Run a store call under a deadline.
pub async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = StoreResult<T>>,
) -> StoreResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}
