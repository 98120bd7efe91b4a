//! OpenAI implementation of [`TextGenerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use newsdesk::ai::OpenAIGenerator;
//! use newsdesk::security::ProviderCredentials;
//!
//! let credentials = ProviderCredentials::new("sk-...", "gpt-4o-mini");
//! let generator = OpenAIGenerator::new(&credentials, Duration::from_secs(30))?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};
use crate::security::ProviderCredentials;
use crate::traits::generator::{GenerationRequest, TextGenerator};

/// Generative-text service backed by an OpenAI-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIGenerator {
    client: OpenAIClient,
    model: String,
}

impl OpenAIGenerator {
    pub fn new(credentials: &ProviderCredentials, timeout: Duration) -> GenerationResult<Self> {
        let mut client = OpenAIClient::new(credentials.api_key.expose())?.with_timeout(timeout)?;
        if let Some(url) = &credentials.base_url {
            client = client.with_base_url(url.as_str());
        }

        Ok(Self {
            client,
            model: credentials.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        let chat = ChatRequest::new(&self.model)
            .message(Message::user(&request.prompt))
            .temperature(request.temperature)
            .output_limit(request.max_output_tokens);

        let response = self.client.chat_completion(chat).await?;

        if response.content.trim().is_empty() {
            return Err(GenerationError::EmptyReply);
        }

        debug!(
            model = %self.model,
            reply_chars = response.content.len(),
            "Generation complete"
        );
        Ok(response.content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
