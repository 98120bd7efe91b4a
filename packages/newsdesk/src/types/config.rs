//! Configuration objects passed into pipeline components at construction.
//!
//! Nothing in the scoring or parsing code reads configuration on its own;
//! callers build these once (usually from environment in the server) and
//! hand them in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::verification::VerificationMode;

/// Estimated provider prices in USD per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub quick: f64,
    pub detailed: f64,
    pub research: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            quick: 0.0005,
            detailed: 0.001,
            research: 0.003,
        }
    }
}

impl Pricing {
    /// Cost of one verification pass, including research when it ran.
    pub fn estimate(&self, mode: VerificationMode, used_research: bool) -> f64 {
        let base = match mode {
            VerificationMode::Quick => self.quick,
            VerificationMode::Detailed => self.detailed,
        };
        if used_research {
            base + self.research
        } else {
            base
        }
    }
}

/// Tuning for the verification orchestrator.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Output-token cap for quick mode.
    pub quick_max_tokens: u32,

    /// Output-token cap for detailed mode.
    pub detailed_max_tokens: u32,

    /// Sampling temperature; kept low for repeatable assessments.
    pub temperature: f32,

    /// Characters of article content sent to the research service.
    pub research_excerpt_chars: usize,

    pub generation_timeout: Duration,
    pub research_timeout: Duration,
    pub store_timeout: Duration,

    pub pricing: Pricing,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            quick_max_tokens: 500,
            detailed_max_tokens: 2000,
            temperature: 0.3,
            research_excerpt_chars: 2000,
            generation_timeout: Duration::from_secs(30),
            research_timeout: Duration::from_secs(20),
            store_timeout: Duration::from_secs(10),
            pricing: Pricing::default(),
        }
    }
}

impl VerifierConfig {
    /// Output-token cap for a mode.
    pub fn max_tokens(&self, mode: VerificationMode) -> u32 {
        match mode {
            VerificationMode::Quick => self.quick_max_tokens,
            VerificationMode::Detailed => self.detailed_max_tokens,
        }
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_research_timeout(mut self, timeout: Duration) -> Self {
        self.research_timeout = timeout;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }
}
