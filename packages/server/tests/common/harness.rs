//! In-process test harness.
//!
//! Builds the real router over an in-memory store and scripted
//! generative-text and research doubles, then drives it with
//! `tower::ServiceExt::oneshot` so no socket is opened.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use newsdesk::testing::{MockGenerator, MockResearcher};
use newsdesk::{ArticleRecord, ArticleStore, MemoryStore, Researcher, TextGenerator, VerifierConfig};
use serde_json::Value;
use server_core::kernel::ServerDeps;
use server_core::server::build_app;
use tower::ServiceExt;

pub struct TestHarness {
    pub app: Router,
    pub store: Arc<MemoryStore>,
    pub generator: Option<Arc<MockGenerator>>,
}

impl TestHarness {
    /// Harness with a configured generator and no research service.
    pub fn new(articles: Vec<ArticleRecord>, generator: MockGenerator) -> Self {
        Self::build(articles, Some(generator), None)
    }

    /// Harness whose generative-text credential is missing.
    pub fn unconfigured(articles: Vec<ArticleRecord>) -> Self {
        Self::build(articles, None, None)
    }

    pub fn with_research(
        articles: Vec<ArticleRecord>,
        generator: MockGenerator,
        researcher: MockResearcher,
    ) -> Self {
        Self::build(articles, Some(generator), Some(researcher))
    }

    fn build(
        articles: Vec<ArticleRecord>,
        generator: Option<MockGenerator>,
        researcher: Option<MockResearcher>,
    ) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(MemoryStore::with_articles(articles));
        let generator = generator.map(Arc::new);
        let researcher = researcher.map(|r| Arc::new(r) as Arc<dyn Researcher>);

        let deps = ServerDeps::new(
            store.clone() as Arc<dyn ArticleStore>,
            generator.clone().map(|g| g as Arc<dyn TextGenerator>),
            researcher,
            VerifierConfig::default(),
        );

        Self {
            app: build_app(deps, &[]),
            store,
            generator,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST a body verbatim with the given content type.
    pub async fn post_raw(&self, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST with no body at all.
    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or_else(
            |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
        );
        (status, json)
    }
}
