//! Server dependencies for request handlers (using traits for testability)
//!
//! Every external service sits behind a `newsdesk` trait object so tests can
//! swap in the in-memory store and scripted generators.

use std::sync::Arc;

use anyhow::{Context, Result};
use newsdesk::{
    ArticleStore, Classifier, MemoryStore, OpenAIGenerator, PerplexityResearcher,
    PostgresStore, Recategorizer, Researcher, ResultPublisher, TextGenerator, Verifier,
    VerifierConfig,
};

use crate::config::Config;

/// Shared pipeline components, built once at startup.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn ArticleStore>,
    pub recategorizer: Arc<Recategorizer>,
    pub verifier: Arc<Verifier>,
}

impl ServerDeps {
    /// Wire the pipeline around already-built collaborators.
    ///
    /// `generator` and `researcher` are `None` when their credentials are
    /// missing; verification then answers 503 and research is skipped.
    pub fn new(
        store: Arc<dyn ArticleStore>,
        generator: Option<Arc<dyn TextGenerator>>,
        researcher: Option<Arc<dyn Researcher>>,
        config: VerifierConfig,
    ) -> Self {
        let recategorizer = Recategorizer::new(Arc::new(Classifier::editorial()), store.clone())
            .with_store_timeout(config.store_timeout);
        let publisher = ResultPublisher::new(store.clone(), config.store_timeout);
        let verifier = Verifier::new(generator, config)
            .with_researcher(researcher)
            .with_publisher(publisher);

        Self {
            store,
            recategorizer: Arc::new(recategorizer),
            verifier: Arc::new(verifier),
        }
    }

    /// Build real collaborators from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn ArticleStore> = match &config.database_url {
            Some(url) => {
                tracing::info!("Connecting to database...");
                let store = PostgresStore::new(url)
                    .await
                    .context("Failed to connect to database")?;
                tracing::info!("Database connected");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory article store");
                Arc::new(MemoryStore::new())
            }
        };

        let generator: Option<Arc<dyn TextGenerator>> = match config.generator_credentials() {
            Some(credentials) => Some(Arc::new(
                OpenAIGenerator::new(&credentials, config.generation_timeout)
                    .context("Failed to create generative-text client")?,
            )),
            None => {
                tracing::warn!("OPENAI_API_KEY not set, verification will be unavailable");
                None
            }
        };

        let researcher: Option<Arc<dyn Researcher>> = match config.research_credentials() {
            Some(credentials) => Some(Arc::new(
                PerplexityResearcher::new(&credentials, config.research_timeout)
                    .context("Failed to create research client")?,
            )),
            None => {
                tracing::info!("PERPLEXITY_API_KEY not set, research augmentation disabled");
                None
            }
        };

        Ok(Self::new(store, generator, researcher, config.verifier_config()))
    }
}
