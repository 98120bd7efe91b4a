use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use newsdesk::security::{ProviderCredentials, SecretString};
use newsdesk::VerifierConfig;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar-pro";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// In-memory store when unset
    pub database_url: Option<String>,
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub perplexity_api_key: Option<SecretString>,
    pub perplexity_model: String,
    pub generation_timeout: Duration,
    pub research_timeout: Duration,
    pub store_timeout: Duration,
    /// Any origin when empty
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: optional("DATABASE_URL"),
            openai_api_key: optional("OPENAI_API_KEY").map(SecretString::from),
            openai_model: optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional("OPENAI_BASE_URL"),
            perplexity_api_key: optional("PERPLEXITY_API_KEY").map(SecretString::from),
            perplexity_model: optional("PERPLEXITY_MODEL")
                .unwrap_or_else(|| DEFAULT_PERPLEXITY_MODEL.to_string()),
            generation_timeout: seconds("GENERATION_TIMEOUT_SECS", 30)?,
            research_timeout: seconds("RESEARCH_TIMEOUT_SECS", 20)?,
            store_timeout: seconds("STORE_TIMEOUT_SECS", 10)?,
            allowed_origins: optional("CORS_ALLOWED_ORIGINS")
                .map(|origins| parse_list(&origins))
                .unwrap_or_default(),
        })
    }

    /// Timeouts applied by the verifier and its publisher.
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig::default()
            .with_generation_timeout(self.generation_timeout)
            .with_research_timeout(self.research_timeout)
            .with_store_timeout(self.store_timeout)
    }

    pub fn generator_credentials(&self) -> Option<ProviderCredentials> {
        let key = self.openai_api_key.as_ref()?;
        let credentials = ProviderCredentials::new(key.expose(), &self.openai_model);
        Some(match &self.openai_base_url {
            Some(url) => credentials.with_base_url(url),
            None => credentials,
        })
    }

    pub fn research_credentials(&self) -> Option<ProviderCredentials> {
        let key = self.perplexity_api_key.as_ref()?;
        Some(ProviderCredentials::new(key.expose(), &self.perplexity_model))
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn seconds(name: &str, default: u64) -> Result<Duration> {
    match optional(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Duration::from_secs)
            .with_context(|| format!("{name} must be a whole number of seconds")),
        None => Ok(Duration::from_secs(default)),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
