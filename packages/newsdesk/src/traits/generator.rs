//! Generative-text trait.

use async_trait::async_trait;

use crate::error::GenerationResult;

/// One prompt → text call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,

    /// Output-token cap for the reply.
    pub max_output_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens,
            temperature,
        }
    }
}

/// A generative-text service.
///
/// Implementations return the reply text unmodified. An empty reply is
/// an error ([`GenerationError::EmptyReply`](crate::error::GenerationError::EmptyReply)),
/// not an empty string.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String>;

    /// Provider/model identifier, for logs.
    fn name(&self) -> &str {
        "generator"
    }
}
