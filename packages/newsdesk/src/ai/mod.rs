//! Hosted-provider implementations of the transport traits.
//!
//! Both providers speak the OpenAI chat-completion dialect, so both are
//! built on `openai-client`.

mod openai;
mod perplexity;

pub use openai::OpenAIGenerator;
pub use perplexity::{PerplexityResearcher, DEFAULT_PERPLEXITY_MODEL, PERPLEXITY_BASE_URL};

use openai_client::OpenAIError;

use crate::error::GenerationError;

impl From<OpenAIError> for GenerationError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::Config(msg) => GenerationError::Config(msg),
            OpenAIError::Timeout(after) => GenerationError::Timeout(after),
            OpenAIError::Network(msg) => GenerationError::Network(msg),
            OpenAIError::Api { status, message } => GenerationError::Api { status, message },
            OpenAIError::Parse(msg) => GenerationError::Malformed(msg),
        }
    }
}
