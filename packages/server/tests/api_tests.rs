//! HTTP contract tests for the classification and verification endpoints.

mod common;

use axum::http::StatusCode;
use common::*;
use newsdesk::testing::{MockGenerator, MockResearcher};
use newsdesk::{GenerationError, ResearchFindings, VerificationMode, VerificationStatus};
use serde_json::json;

fn quick_reply() -> MockGenerator {
    MockGenerator::new().with_reply(
        "STATUS: passed\nSUMMARY: The article matches the clerk record.\nCONFIDENCE: 91",
    )
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_configuration() {
    let harness = TestHarness::new(corpus(), quick_reply());
    let (status, body) = harness.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["status"], "ok");
    assert_eq!(body["generator"], "configured");
    assert_eq!(body["research"], "not_configured");
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn test_preview_projects_without_writing() {
    let harness = TestHarness::new(corpus(), MockGenerator::new());
    let (status, body) = harness.get("/classify/preview").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["currentDistribution"]["News"], 3);
    assert_eq!(body["proposedDistribution"]["Sports"], 1);
    assert_eq!(body["proposedDistribution"]["Outdoors"], 1);
    assert_eq!(body["proposedDistribution"]["News"], 1);
    assert_eq!(body["proposedDistribution"]["Business"], 0);
    assert_eq!(body["wouldChangeCount"], 2);

    let stored = harness.store.get("sports-1").unwrap();
    assert_eq!(stored.article.category.as_deref(), Some("News"));
}

#[tokio::test]
async fn test_execute_without_body_uses_default_batch() {
    let harness = TestHarness::new(corpus(), MockGenerator::new());
    let (status, body) = harness.post_empty("/classify/execute").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 2);
    assert_eq!(body["unchangedCount"], 1);
    assert_eq!(body["errorCount"], 0);
    assert_eq!(body["errorSamples"], json!([]));
    assert_eq!(body["remainingCount"], 0);
    assert_eq!(body["transitions"]["News → Sports"], 1);

    let stored = harness.store.get("trail-1").unwrap();
    assert_eq!(stored.article.category.as_deref(), Some("Outdoors"));
}

#[tokio::test]
async fn test_execute_zero_batch_updates_nothing() {
    let harness = TestHarness::new(corpus(), MockGenerator::new());
    let (status, body) = harness
        .post("/classify/execute", json!({ "batchSize": 0 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 0);
    assert_eq!(body["unchangedCount"], 0);
    assert_eq!(body["remainingCount"], 3);
}

#[tokio::test]
async fn test_distribution_after_execute() {
    let harness = TestHarness::new(corpus(), MockGenerator::new());
    harness
        .post("/classify/execute", json!({ "batchSize": 10 }))
        .await;

    let (status, body) = harness.get("/classify/distribution").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["noCategory"], 0);
    assert_eq!(body["categoryCounts"]["sports"], 1);
    assert_eq!(body["visible"], 3);
    assert_eq!(body["hidden"], 0);
    assert_eq!(body["knownCategories"][0], "news");
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn test_verify_requires_title_and_content() {
    let harness = TestHarness::new(corpus(), quick_reply());

    let (status, body) = harness
        .post("/verify", json!({ "mode": "quick", "content": "Body" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "title is required");

    let (status, _) = harness
        .post("/verify", json!({ "mode": "quick", "title": "Title", "content": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(harness.generator.as_ref().unwrap().call_count(), 0);
}

#[tokio::test]
async fn test_verify_malformed_body_is_validation_error() {
    let harness = TestHarness::new(corpus(), quick_reply());

    let (status, body) = harness
        .post_raw("/verify", "application/json", r#"{"title": "Title", "content": "#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(!body["message"].as_str().unwrap().is_empty());

    let (status, body) = harness
        .post_raw("/verify", "text/plain", "title=Title&content=Body")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    assert_eq!(harness.generator.as_ref().unwrap().call_count(), 0);
}

#[tokio::test]
async fn test_verify_without_credential_is_503() {
    let harness = TestHarness::unconfigured(corpus());
    let (status, body) = harness
        .post("/verify", json!({ "title": "Title", "content": "Body" }))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "not_configured");
    assert!(body["message"].as_str().unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_verify_upstream_failure_hides_detail() {
    let generator = MockGenerator::new().with_error(GenerationError::Api {
        status: 429,
        message: "quota exceeded for key sk-live".into(),
    });
    let harness = TestHarness::new(corpus(), generator);

    let (status, body) = harness
        .post("/verify", json!({ "title": "Title", "content": "Body" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "upstream_error");
    assert_eq!(body["message"], "Fact-check service temporarily unavailable");
    assert!(!body.to_string().contains("sk-live"));
}

#[tokio::test]
async fn test_quick_verify_writes_back_via_legacy_id() {
    let harness = TestHarness::new(corpus(), quick_reply());
    let (status, body) = harness
        .post(
            "/verify",
            json!({
                "mode": "quick",
                "articleId": "civic-1",
                "title": "Mayor Signs Ordinance",
                "content": "The mayor signed the ordinance after a public hearing."
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "quick");
    assert_eq!(body["status"], "passed");
    assert_eq!(body["confidence"], 91);
    assert_eq!(body["summary"], "The article matches the clerk record.");
    assert!(body.get("usedResearch").is_none());
    assert!(body.get("claims").is_none());

    let snapshot = harness.store.get("civic-1").unwrap().verification.unwrap();
    assert_eq!(snapshot.status, VerificationStatus::Passed);
    assert_eq!(snapshot.mode, VerificationMode::Quick);
}

#[tokio::test]
async fn test_detailed_verify_with_research() {
    let generator = MockGenerator::new().with_reply(
        "STATUS: Review-Recommended\n\
         CONFIDENCE: 140\n\
         CLAIMS:\n\
         1. \"The mayor signed the ordinance\" | verified | Clerk record\n\
         2. \"after a public hearing\" | unverified | No notice found\n\
         RECOMMENDATIONS:\n\
         - Link the hearing notice",
    );
    let researcher = MockResearcher::returning(
        ResearchFindings::new("The ordinance was signed on Monday.")
            .with_citations(["https://city.example/minutes"]),
    );
    let harness = TestHarness::with_research(corpus(), generator, researcher);

    let (status, body) = harness
        .post(
            "/verify",
            json!({
                "mode": "DETAILED",
                "recordId": "civic-1",
                "title": "Mayor Signs Ordinance",
                "content": "The mayor signed the ordinance after a public hearing.",
                "sourceTitle": "City press release",
                "usePerplexity": true
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "detailed");
    assert_eq!(body["status"], "review_recommended");
    assert_eq!(body["confidence"], 100);
    assert_eq!(body["usedResearch"], true);
    assert_eq!(body["citations"], json!(["https://city.example/minutes"]));
    assert_eq!(body["claims"].as_array().unwrap().len(), 2);
    assert_eq!(body["claims"][1]["status"], "unverified");
    assert_eq!(body["recommendations"], json!(["Link the hearing notice"]));

    let prompt = &harness.generator.as_ref().unwrap().requests()[0].prompt;
    assert!(prompt.contains("The ordinance was signed on Monday."));
    assert!(prompt.contains("City press release"));
}
