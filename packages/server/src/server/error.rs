//! HTTP error mapping.
//!
//! Every failing handler returns [`ApiError`]; the body is always
//! `{"error": <code>, "message": <text>}`. Upstream and storage detail is
//! logged here and never sent to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsdesk::{StoreError, VerifyError};
use serde_json::json;

/// Caller-facing text for any generative-text failure.
pub const UPSTREAM_MESSAGE: &str = "Fact-check service temporarily unavailable";

#[derive(Debug)]
pub enum ApiError {
    /// Missing or unreadable input (400)
    Validation(String),
    /// Mandatory credential missing (503)
    NotConfigured(String),
    /// Generative-text call failed (500)
    Upstream(String),
    /// Article store failed (500)
    Store(StoreError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::NotConfigured(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_configured"),
            ApiError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        }
    }
}

impl From<VerifyError> for ApiError {
    fn from(error: VerifyError) -> Self {
        match error {
            VerifyError::Validation { .. } => ApiError::Validation(error.to_string()),
            VerifyError::Configuration { credential } => ApiError::NotConfigured(format!(
                "Fact-check service not configured. Please configure {credential}."
            )),
            VerifyError::Upstream(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        ApiError::Store(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match self {
            ApiError::Validation(message) | ApiError::NotConfigured(message) => message,
            ApiError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Verification failed upstream");
                UPSTREAM_MESSAGE.to_string()
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Article store request failed");
                "Article store unavailable".to_string()
            }
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk::GenerationError;

    #[test]
    fn test_verify_errors_map_to_status_codes() {
        let cases = [
            (
                VerifyError::Validation { field: "title" },
                StatusCode::BAD_REQUEST,
            ),
            (
                VerifyError::Configuration {
                    credential: "OPENAI_API_KEY",
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                VerifyError::Upstream(GenerationError::EmptyReply),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), expected);
        }
    }

    #[test]
    fn test_configuration_message_names_credential() {
        let error = ApiError::from(VerifyError::Configuration {
            credential: "OPENAI_API_KEY",
        });
        match error {
            ApiError::NotConfigured(message) => assert!(message.contains("OPENAI_API_KEY")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
