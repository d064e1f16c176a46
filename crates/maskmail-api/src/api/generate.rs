/// Alias generation endpoint
use axum::{Json, body::Bytes, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::body::{decode, string_field};
use crate::{context::ApiContext, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "realEmail", default, deserialize_with = "string_field")]
    pub real_email: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub plan: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "maskedEmail")]
    pub masked_email: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// Issue a masked alias for `realEmail`
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let req: GenerateRequest = decode(&body);
    let binding = ctx
        .aliases
        .generate(req.real_email.as_deref(), req.plan.as_deref())
        .await?;

    Ok(Json(GenerateResponse {
        masked_email: binding.alias,
        expires_at: binding.expires_at,
    }))
}
