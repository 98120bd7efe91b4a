//! Research augmentation output.

use serde::{Deserialize, Serialize};

/// Narrative and citations returned by a web-research provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchFindings {
    /// Free-text narrative from the research service.
    pub narrative: String,

    /// Citation URLs in provider order (possibly empty).
    pub citations: Vec<String>,
}

impl ResearchFindings {
    pub fn new(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.citations.extend(citations.into_iter().map(Into::into));
        self
    }

    /// Whether the narrative carries any text worth embedding.
    pub fn has_narrative(&self) -> bool {
        !self.narrative.trim().is_empty()
    }
}
