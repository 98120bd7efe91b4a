use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use newsdesk::ArticleStore;
use serde::Serialize;

use crate::server::app::AxumAppState;

const STORE_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
    generator: String,
    research: String,
}

#[derive(Serialize)]
pub struct StoreHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Checks:
/// - Article store reachability
/// - Whether the generative-text and research credentials are configured
///
/// Returns 200 OK when the store answers, 503 Service Unavailable otherwise.
/// Missing credentials are reported but do not make the service unhealthy.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.server_deps;

    let store = match tokio::time::timeout(STORE_PING_TIMEOUT, deps.store.ping()).await {
        Ok(Ok(())) => StoreHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            status: "error".to_string(),
            error: Some(format!("Ping failed: {}", e)),
        },
        Err(_) => StoreHealth {
            status: "error".to_string(),
            error: Some("Ping timeout (>5s)".to_string()),
        },
    };

    let is_healthy = store.status == "ok";
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" }.to_string(),
            store,
            generator: configured(deps.verifier.is_configured()),
            research: configured(deps.verifier.research_configured()),
        }),
    )
}

fn configured(flag: bool) -> String {
    let label = if flag { "configured" } else { "not_configured" };
    label.to_string()
}
