//! POST /verify
//!
//! Accepts the editor-facing field names plus the older `articleId` and
//! `usePerplexity` spellings.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use newsdesk::{SourceMaterial, VerificationMode, VerificationRequest, VerificationResult};
use serde::Deserialize;

use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, alias = "articleId")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source_title: Option<String>,
    #[serde(default)]
    pub source_summary: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default, alias = "usePerplexity")]
    pub use_research: Option<bool>,
}

impl From<VerifyBody> for VerificationRequest {
    fn from(body: VerifyBody) -> Self {
        let mode = body
            .mode
            .as_deref()
            .map(VerificationMode::from_label)
            .unwrap_or_default();

        let source = SourceMaterial {
            title: body.source_title,
            summary: body.source_summary,
            url: body.source_url,
        };
        let has_source =
            source.title.is_some() || source.summary.is_some() || source.url.is_some();

        VerificationRequest {
            mode,
            title: body.title.unwrap_or_default(),
            content: body.content.unwrap_or_default(),
            source: has_source.then_some(source),
            use_research: body.use_research.unwrap_or(false),
            record_id: body.record_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

pub async fn verify_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<VerifyBody>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let request = VerificationRequest::from(body);
    let result = state.server_deps.verifier.verify(&request).await?;
    Ok(Json(result))
}
