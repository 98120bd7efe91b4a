//! Fact-verification orchestration.
//!
//! A request moves through validation, optional research, prompt
//! building, a single generative-text call, tolerant parsing, and an
//! optional write-back. Only validation, a missing generator, and the
//! generative call itself can fail the request.

pub mod parser;
pub mod prompts;
pub mod status;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::error::{GenerationError, Result, VerifyError};
use crate::publish::ResultPublisher;
use crate::research::ResearchAugmenter;
use crate::traits::generator::{GenerationRequest, TextGenerator};
use crate::traits::researcher::Researcher;
use crate::types::config::VerifierConfig;
use crate::types::verification::{
    VerificationHeader, VerificationMode, VerificationRequest, VerificationResult,
};

pub use parser::{parse_reply, ParsedReply};
pub use prompts::{build_prompt, PromptInput};
pub use status::normalize;

/// Credential named in the configuration error when no generator is set.
pub const GENERATOR_CREDENTIAL: &str = "OPENAI_API_KEY";

/// Coordinates research, generation, parsing and publishing.
#[derive(Clone)]
pub struct Verifier {
    generator: Option<Arc<dyn TextGenerator>>,
    research: ResearchAugmenter,
    publisher: Option<ResultPublisher>,
    config: VerifierConfig,
}

impl Verifier {
    /// A verifier without research or write-back.
    ///
    /// `generator` is `None` when no credential is configured; every
    /// request then fails with [`VerifyError::Configuration`].
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, config: VerifierConfig) -> Self {
        let research = ResearchAugmenter::new(
            None,
            config.research_timeout,
            config.research_excerpt_chars,
        );
        Self {
            generator,
            research,
            publisher: None,
            config,
        }
    }

    pub fn with_researcher(mut self, researcher: Option<Arc<dyn Researcher>>) -> Self {
        self.research = ResearchAugmenter::new(
            researcher,
            self.config.research_timeout,
            self.config.research_excerpt_chars,
        );
        self
    }

    pub fn with_publisher(mut self, publisher: ResultPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Whether a generative-text service is configured.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn research_configured(&self) -> bool {
        self.research.is_configured()
    }

    /// Verify one article.
    #[instrument(skip(self, request), fields(mode = %request.mode, record_id = ?request.record_id))]
    pub async fn verify(&self, request: &VerificationRequest) -> Result<VerificationResult> {
        let started = Instant::now();

        validate(request)?;
        let generator = self.generator.as_ref().ok_or(VerifyError::Configuration {
            credential: GENERATOR_CREDENTIAL,
        })?;

        let research = if request.use_research {
            self.research.augment(&request.title, &request.content).await
        } else {
            None
        };

        let prompt = build_prompt(
            request.mode,
            PromptInput {
                title: &request.title,
                content: &request.content,
                source: request.source.as_ref(),
                research: research.as_ref(),
            },
        );

        let generation = GenerationRequest::new(
            prompt,
            self.config.max_tokens(request.mode),
            self.config.temperature,
        );
        let raw = self.generate(generator.as_ref(), &generation).await?;

        let parsed = parse_reply(&raw, request.mode);
        let used_research = research.is_some();
        let header = VerificationHeader {
            status: parsed.status,
            summary: parsed.summary,
            confidence: parsed.confidence,
            checked_at: Utc::now(),
            used_research: request.use_research.then_some(used_research),
            citations: research
                .map(|r| r.citations)
                .filter(|citations| !citations.is_empty()),
            cost: Some(self.config.pricing.estimate(request.mode, used_research)),
        };

        let result = match request.mode {
            VerificationMode::Quick => VerificationResult::Quick { header },
            VerificationMode::Detailed => VerificationResult::Detailed {
                header,
                claims: parsed.claims,
                recommendations: parsed.recommendations,
            },
        };

        if let (Some(record_id), Some(publisher)) = (request.record_id.as_deref(), &self.publisher) {
            publisher.persist(record_id, &result).await;
        }

        info!(
            status = %result.status(),
            confidence = result.confidence(),
            claims = result.claims().len(),
            used_research,
            duration_ms = started.elapsed().as_millis() as u64,
            "Verification complete"
        );

        Ok(result)
    }

    async fn generate(
        &self,
        generator: &dyn TextGenerator,
        request: &GenerationRequest,
    ) -> Result<String> {
        let timeout = self.config.generation_timeout;
        let outcome = match tokio::time::timeout(timeout, generator.generate(request)).await {
            Ok(Ok(text)) if text.trim().is_empty() => Err(GenerationError::EmptyReply),
            Ok(outcome) => outcome,
            Err(_) => Err(GenerationError::Timeout(timeout)),
        };

        outcome.map_err(|e| {
            error!(generator = generator.name(), error = %e, "Generative-text call failed");
            VerifyError::Upstream(e)
        })
    }
}

fn validate(request: &VerificationRequest) -> Result<()> {
    if request.title.trim().is_empty() {
        return Err(VerifyError::Validation { field: "title" });
    }
    if request.content.trim().is_empty() {
        return Err(VerifyError::Validation { field: "content" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockGenerator, MockResearcher};
    use crate::types::research::ResearchFindings;
    use crate::types::verification::{SourceMaterial, VerificationStatus};
    use std::time::Duration;

    fn verifier(generator: Arc<MockGenerator>) -> Verifier {
        let generator: Arc<dyn TextGenerator> = generator;
        Verifier::new(Some(generator), VerifierConfig::default())
    }

    fn request(mode: VerificationMode) -> VerificationRequest {
        VerificationRequest::new(mode, "Mill reopens", "The mill reopened Tuesday with 40 staff.")
    }

    #[tokio::test]
    async fn test_missing_title_or_content_is_validation_error() {
        let generator = Arc::new(MockGenerator::new().with_reply("STATUS: passed"));
        let verifier = verifier(generator.clone());

        let err = verifier
            .verify(&VerificationRequest::new(VerificationMode::Quick, " ", "body"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Validation { field: "title" }));

        let err = verifier
            .verify(&VerificationRequest::new(VerificationMode::Quick, "title", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Validation { field: "content" }));

        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_generator_is_configuration_error() {
        let verifier = Verifier::new(None, VerifierConfig::default());
        let err = verifier.verify(&request(VerificationMode::Quick)).await.unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Configuration {
                credential: GENERATOR_CREDENTIAL
            }
        ));
    }

    #[tokio::test]
    async fn test_quick_uses_small_token_cap_and_low_temperature() {
        let generator = Arc::new(
            MockGenerator::new().with_reply("STATUS: passed\nSUMMARY: Fine.\nCONFIDENCE: 93"),
        );
        let result = verifier(generator.clone())
            .verify(&request(VerificationMode::Quick))
            .await
            .unwrap();

        assert_eq!(result.mode(), VerificationMode::Quick);
        assert_eq!(result.status(), VerificationStatus::Passed);
        assert_eq!(result.confidence(), 93);
        assert_eq!(result.header().cost, Some(0.0005));
        assert!(result.header().used_research.is_none());

        let sent = generator.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].max_output_tokens, 500);
        assert!((sent[0].temperature - 0.3).abs() < f32::EPSILON);
        assert!(sent[0].prompt.contains(prompts::NO_SOURCE_MARKER));
    }

    #[tokio::test]
    async fn test_detailed_carries_claims() {
        let generator = Arc::new(MockGenerator::new().with_reply(
            "STATUS: caution\nCONFIDENCE: 70\nCLAIMS:\n1. \"40 staff\" | unverified | No source\nRECOMMENDATIONS:\n- Confirm headcount",
        ));
        let req = request(VerificationMode::Detailed).with_source(SourceMaterial {
            title: Some("Mill press release".into()),
            ..Default::default()
        });

        let result = verifier(generator.clone()).verify(&req).await.unwrap();

        assert_eq!(result.claims().len(), 1);
        assert_eq!(result.recommendations(), &["Confirm headcount".to_string()]);
        assert_eq!(
            result.summary(),
            "Analysis of 1 claims: 0 verified, 1 unverified, 0 disputed. Status: caution."
        );
        assert_eq!(generator.requests()[0].max_output_tokens, 2000);
        assert!(generator.requests()[0].prompt.contains("Title: Mill press release"));
    }

    #[tokio::test]
    async fn test_upstream_failure_and_empty_reply() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_error(GenerationError::Api {
                    status: 500,
                    message: "boom".into(),
                })
                .with_reply("   "),
        );
        let verifier = verifier(generator);

        let err = verifier.verify(&request(VerificationMode::Quick)).await.unwrap_err();
        assert!(matches!(err, VerifyError::Upstream(GenerationError::Api { status: 500, .. })));

        let err = verifier.verify(&request(VerificationMode::Quick)).await.unwrap_err();
        assert!(matches!(err, VerifyError::Upstream(GenerationError::EmptyReply)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_timeout_is_upstream_error() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_reply("STATUS: passed")
                .with_delay(Duration::from_secs(120)),
        );
        let err = verifier(generator)
            .verify(&request(VerificationMode::Quick))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::Upstream(GenerationError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_research_embedded_and_costed() {
        let generator = Arc::new(MockGenerator::new().with_reply("STATUS: passed\nCONFIDENCE: 80"));
        let researcher = Arc::new(MockResearcher::returning(
            ResearchFindings::new("The mill reopened on Tuesday.")
                .with_citations(["https://paper.example/mill"]),
        ));
        let verifier = verifier(generator.clone()).with_researcher(Some(researcher as Arc<dyn Researcher>));

        let result = verifier
            .verify(&request(VerificationMode::Quick).with_research(true))
            .await
            .unwrap();

        assert_eq!(result.header().used_research, Some(true));
        assert_eq!(
            result.header().citations,
            Some(vec!["https://paper.example/mill".to_string()])
        );
        assert_eq!(result.header().cost, Some(0.0005 + 0.003));
        assert!(generator.requests()[0].prompt.contains("The mill reopened on Tuesday."));
    }

    #[tokio::test]
    async fn test_research_failure_is_not_fatal() {
        let generator = Arc::new(MockGenerator::new().with_reply("STATUS: passed"));
        let verifier = verifier(generator).with_researcher(Some(Arc::new(MockResearcher::failing())));

        let result = verifier
            .verify(&request(VerificationMode::Quick).with_research(true))
            .await
            .unwrap();

        assert_eq!(result.header().used_research, Some(false));
        assert!(result.header().citations.is_none());
        assert_eq!(result.header().cost, Some(0.0005));
    }

    #[tokio::test]
    async fn test_research_skipped_when_not_requested() {
        let generator = Arc::new(MockGenerator::new().with_reply("STATUS: passed"));
        let researcher = Arc::new(MockResearcher::returning(ResearchFindings::new("unused")));
        let verifier =
            verifier(generator).with_researcher(Some(researcher.clone() as Arc<dyn Researcher>));

        verifier.verify(&request(VerificationMode::Quick)).await.unwrap();
        assert!(researcher.calls().is_empty());
    }
}
