//! Optional live-research augmentation.
//!
//! Research never fails a verification: every error, including a missing
//! service or a timeout, is logged and turned into `None`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::ResearchError;
use crate::traits::researcher::Researcher;
use crate::types::research::ResearchFindings;

/// Wraps an optional [`Researcher`] with a deadline and excerpt clipping.
#[derive(Clone)]
pub struct ResearchAugmenter {
    researcher: Option<Arc<dyn Researcher>>,
    timeout: Duration,
    excerpt_chars: usize,
}

impl ResearchAugmenter {
    pub fn new(researcher: Option<Arc<dyn Researcher>>, timeout: Duration, excerpt_chars: usize) -> Self {
        Self {
            researcher,
            timeout,
            excerpt_chars,
        }
    }

    /// An augmenter that never has anything to add.
    pub fn disabled() -> Self {
        Self::new(None, Duration::from_secs(20), 2000)
    }

    pub fn is_configured(&self) -> bool {
        self.researcher.is_some()
    }

    /// Research the article's claims.
    ///
    /// Returns `None` when no service is configured, the call fails or
    /// times out, or the reply has no narrative.
    pub async fn augment(&self, title: &str, content: &str) -> Option<ResearchFindings> {
        let started = Instant::now();
        match self.try_augment(title, content).await {
            Ok(findings) if findings.has_narrative() => {
                debug!(
                    citations = findings.citations.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Research context gathered"
                );
                Some(findings)
            }
            Ok(_) => {
                warn!("Research returned no narrative, continuing without it");
                None
            }
            Err(ResearchError::NotConfigured) => {
                debug!("Research requested but no research service configured");
                None
            }
            Err(e) => {
                warn!(error = %e, "Research failed, continuing without it");
                None
            }
        }
    }

    async fn try_augment(&self, title: &str, content: &str) -> Result<ResearchFindings, ResearchError> {
        let researcher = self.researcher.as_ref().ok_or(ResearchError::NotConfigured)?;

        let query = research_query(title);
        let excerpt = excerpt(content, self.excerpt_chars);

        match tokio::time::timeout(self.timeout, researcher.research(&query, Some(excerpt))).await {
            Ok(result) => result,
            Err(_) => Err(ResearchError::Timeout(self.timeout)),
        }
    }
}

/// Query sent to the research service for an article title.
pub fn research_query(title: &str) -> String {
    format!(
        "Verify the factual claims in this news article: \"{}\". \
         Find current, authoritative sources that confirm or contradict its key facts.",
        title.trim()
    )
}

/// The first `max_chars` characters of `content`.
pub fn excerpt(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
