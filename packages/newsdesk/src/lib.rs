//! Editorial Classification & Verification Pipeline
//!
//! Two independent branches over the same article records:
//!
//! - **Classification**: scores title, slug, tags and body against curated
//!   per-category keyword tables and picks a topical category, one article
//!   at a time or as a capped batch over the whole store.
//! - **Verification**: asks a generative-text service to fact-check an
//!   article (quick or detailed), optionally with live web research mixed
//!   into the prompt, and parses the semi-structured reply into a typed
//!   result that can be written back to the store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use newsdesk::{Classifier, MemoryStore, Recategorizer, Verifier, VerifierConfig};
//! use newsdesk::testing::MockGenerator;
//!
//! let store = Arc::new(MemoryStore::new());
//!
//! let recategorizer = Recategorizer::new(Arc::new(Classifier::editorial()), store.clone());
//! let preview = recategorizer.preview().await?;
//!
//! let generator = Arc::new(MockGenerator::new().with_reply("STATUS: passed"));
//! let verifier = Verifier::new(Some(generator), VerifierConfig::default());
//! let result = verifier.verify(&request).await?;
//! ```
//!
//! # Modules
//!
//! - [`classify`] - Keyword tables, scoring and batch recategorization
//! - [`verify`] - Prompting, reply parsing and the verification orchestrator
//! - [`research`] - Optional research augmentation
//! - [`publish`] - Verification write-back
//! - [`traits`] - Generator, researcher and store abstractions
//! - [`stores`] - Storage implementations (MemoryStore, PostgresStore)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod classify;
pub mod error;
pub mod publish;
pub mod research;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod verify;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{GenerationError, ResearchError, StoreError, VerifyError};
pub use traits::{
    generator::{GenerationRequest, TextGenerator},
    researcher::Researcher,
    store::ArticleStore,
};
pub use types::{
    article::{ArticleRecord, CategoryUpdate},
    classification::{
        CategoryChange, ClassificationPreview, ClassificationResult, ClassificationRun,
        ClassificationScore, DistributionReport, KeywordMatch,
    },
    config::{Pricing, VerifierConfig},
    research::ResearchFindings,
    verification::{
        Claim, ClaimStatus, SourceMaterial, VerificationHeader, VerificationMode,
        VerificationRequest, VerificationResult, VerificationSnapshot, VerificationStatus,
    },
};

pub use classify::{ArticleText, CategoryKeywordTable, Classifier, Recategorizer, DEFAULT_BATCH_SIZE};
pub use publish::ResultPublisher;
pub use research::ResearchAugmenter;
pub use verify::{Verifier, GENERATOR_CREDENTIAL};

pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

#[cfg(feature = "openai")]
pub use ai::{OpenAIGenerator, PerplexityResearcher};
