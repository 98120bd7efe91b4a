//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without making real
//! generative-text, research or database calls.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{
    GenerationError, GenerationResult, ResearchError, ResearchResult, StoreError, StoreResult,
};
use crate::stores::MemoryStore;
use crate::traits::{
    generator::{GenerationRequest, TextGenerator},
    researcher::Researcher,
    store::ArticleStore,
};
use crate::types::article::{ArticleRecord, CategoryUpdate};
use crate::types::research::ResearchFindings;
use crate::types::verification::VerificationSnapshot;

/// A scripted generative-text service.
///
/// Replies are served in the order they were queued; once the queue is
/// empty every call fails with [`GenerationError::EmptyReply`].
#[derive(Default)]
pub struct MockGenerator {
    replies: Arc<RwLock<VecDeque<GenerationResult<String>>>>,
    delay: Option<Duration>,

    /// Call tracking for assertions
    requests: Arc<RwLock<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies.write().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.replies.write().unwrap().push_back(Err(error));
        self
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        self.requests.write().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.replies.write().unwrap().pop_front();
        next.unwrap_or(Err(GenerationError::EmptyReply))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A canned research service.
pub struct MockResearcher {
    outcome: Option<ResearchFindings>,
    delay: Option<Duration>,

    /// `(query, context)` per call
    calls: Arc<RwLock<Vec<(String, Option<String>)>>>,
}

impl MockResearcher {
    /// Always answer with `findings`.
    pub fn returning(findings: ResearchFindings) -> Self {
        Self {
            outcome: Some(findings),
            delay: None,
            calls: Arc::default(),
        }
    }

    /// Always fail with a provider error.
    pub fn failing() -> Self {
        Self {
            outcome: None,
            delay: None,
            calls: Arc::default(),
        }
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Researcher for MockResearcher {
    async fn research(&self, query: &str, context: Option<&str>) -> ResearchResult<ResearchFindings> {
        self.calls
            .write()
            .unwrap()
            .push((query.to_string(), context.map(str::to_string)));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.clone().ok_or(ResearchError::Service(GenerationError::Api {
            status: 502,
            message: "research provider unavailable".into(),
        }))
    }
}

/// A [`MemoryStore`] whose writes can be made to fail per record.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing_ids: Arc<RwLock<HashSet<String>>>,
    fail_all_writes: bool,
}

impl FlakyStore {
    pub fn new(articles: impl IntoIterator<Item = ArticleRecord>) -> Self {
        Self {
            inner: MemoryStore::with_articles(articles),
            ..Default::default()
        }
    }

    /// Fail every write to `id`.
    pub fn failing_on(self, id: impl Into<String>) -> Self {
        self.failing_ids.write().unwrap().insert(id.into());
        self
    }

    /// Fail every write.
    pub fn failing_writes(mut self) -> Self {
        self.fail_all_writes = true;
        self
    }

    /// The wrapped store, for inspecting what was written.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, id: &str) -> StoreResult<()> {
        if self.fail_all_writes || self.failing_ids.read().unwrap().contains(id) {
            return Err(StoreError::backend(std::io::Error::other(format!(
                "write rejected for {id}"
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for FlakyStore {
    async fn list_articles(&self) -> StoreResult<Vec<ArticleRecord>> {
        self.inner.list_articles().await
    }

    async fn update_category(&self, id: &str, update: &CategoryUpdate) -> StoreResult<()> {
        self.check(id)?;
        self.inner.update_category(id, update).await
    }

    async fn save_verification(&self, id: &str, snapshot: &VerificationSnapshot) -> StoreResult<()> {
        self.check(id)?;
        self.inner.save_verification(id, snapshot).await
    }
}
