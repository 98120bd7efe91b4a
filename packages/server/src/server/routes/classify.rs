//! Corpus recategorization endpoints.
//!
//! GET  /classify/preview       projected distribution, no writes
//! POST /classify/execute       recategorize one capped batch
//! GET  /classify/distribution  stored-label coverage

use axum::{extract::Extension, Json};
use newsdesk::{ClassificationPreview, ClassificationRun, DistributionReport, DEFAULT_BATCH_SIZE};
use serde::Deserialize;

use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteBody {
    /// Defaults to 100; zero is honoured and updates nothing.
    #[serde(default)]
    pub batch_size: Option<usize>,
}

pub async fn classify_preview_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<ClassificationPreview>, ApiError> {
    let preview = state.server_deps.recategorizer.preview().await?;
    Ok(Json(preview))
}

/// An absent or unreadable body runs the default batch.
pub async fn classify_execute_handler(
    Extension(state): Extension<AxumAppState>,
    body: Option<Json<ExecuteBody>>,
) -> Result<Json<ClassificationRun>, ApiError> {
    let batch_size = body
        .and_then(|Json(body)| body.batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);

    let run = state.server_deps.recategorizer.execute(batch_size).await?;
    Ok(Json(run))
}

pub async fn classify_distribution_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Json<DistributionReport>, ApiError> {
    let report = state.server_deps.recategorizer.distribution().await?;
    Ok(Json(report))
}
