/// Liveness and health endpoints
use axum::{Json, extract::State, http::StatusCode};
use maskmail_core::constants::LIVENESS_MESSAGE;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::context::ApiContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    /// Stored bindings, including expired ones awaiting sweep
    pub bindings: usize,
}

/// Static confirmation string for load balancers
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check handler
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (status, bindings, healthy) = match ctx.store.len().await {
        Ok(count) => ("healthy", count, true),
        Err(e) => {
            error!("Binding store health check failed: {}", e);
            ("degraded", 0, false)
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        bindings,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_structure() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: "2026-10-18T10:00:00Z".to_string(),
            bindings: 3,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("\"bindings\":3"));
    }

    #[tokio::test]
    async fn test_liveness_message() {
        assert_eq!(liveness().await, "Backend is working!");
    }
}
