//! Perplexity implementation of [`Researcher`].

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::debug;

use crate::error::{GenerationError, ResearchResult};
use crate::security::ProviderCredentials;
use crate::traits::researcher::Researcher;
use crate::types::research::ResearchFindings;

pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar-pro";

const SYSTEM_PROMPT: &str = "You are a fact-checking assistant for a news publication. \
Provide current, verified information with citations.";
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 1000;

/// Live web research through Perplexity's chat endpoint.
#[derive(Debug, Clone)]
pub struct PerplexityResearcher {
    client: OpenAIClient,
    model: String,
}

impl PerplexityResearcher {
    pub fn new(credentials: &ProviderCredentials, timeout: Duration) -> ResearchResult<Self> {
        let base_url = credentials.base_url.as_deref().unwrap_or(PERPLEXITY_BASE_URL);
        let client = OpenAIClient::new(credentials.api_key.expose())
            .and_then(|c| c.with_timeout(timeout))
            .map_err(GenerationError::from)?
            .with_base_url(base_url);

        Ok(Self {
            client,
            model: credentials.model.clone(),
        })
    }
}

#[async_trait]
impl Researcher for PerplexityResearcher {
    async fn research(&self, query: &str, context: Option<&str>) -> ResearchResult<ResearchFindings> {
        let content = match context {
            Some(context) => format!("Context: {}\n\nQuery: {}", context, query),
            None => query.to_string(),
        };

        let request = ChatRequest::new(&self.model)
            .message(Message::system(SYSTEM_PROMPT))
            .message(Message::user(content))
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS);

        let response = self
            .client
            .chat_completion(request)
            .await
            .map_err(GenerationError::from)?;

        debug!(
            model = %self.model,
            citations = response.citations.len(),
            "Research reply received"
        );

        Ok(ResearchFindings::new(response.content).with_citations(response.citations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResearchError;
    use mockito::Matcher;
    use serde_json::json;

    fn researcher(base_url: String) -> PerplexityResearcher {
        let credentials =
            ProviderCredentials::new("pplx-test", DEFAULT_PERPLEXITY_MODEL).with_base_url(base_url);
        PerplexityResearcher::new(&credentials, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_research_returns_narrative_and_citations() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "model": "sonar-pro",
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "Context: excerpt\n\nQuery: is it true?"}
                ]
            })))
            .with_status(200)
            .with_body(
                r#"{
                    "choices": [{"message": {"role": "assistant", "content": "Confirmed by two outlets."}}],
                    "citations": ["https://a.example", "https://b.example"]
                }"#,
            )
            .create_async()
            .await;

        let findings = researcher(server.url())
            .research("is it true?", Some("excerpt"))
            .await
            .unwrap();

        assert_eq!(findings.narrative, "Confirmed by two outlets.");
        assert_eq!(findings.citations, vec!["https://a.example", "https://b.example"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_failure_is_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .create_async()
            .await;

        let err = researcher(server.url()).research("q", None).await.unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Service(GenerationError::Api { status: 503, .. })
        ));
    }
}
