//! Web-research trait.

use async_trait::async_trait;

use crate::error::ResearchResult;
use crate::types::research::ResearchFindings;

/// A live web-research service.
#[async_trait]
pub trait Researcher: Send + Sync {
    /// Answer `query`, optionally grounded in `context` (an article excerpt).
    async fn research(&self, query: &str, context: Option<&str>) -> ResearchResult<ResearchFindings>;
}
