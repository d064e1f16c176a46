/// Forwarding endpoint
use axum::{Json, body::Bytes, extract::State};
use maskmail_core::services::ForwardRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::body::{decode, string_field};
use crate::{context::ApiContext, error::ApiError};

/// Missing fields decode as empty strings; an empty alias is simply unknown
#[derive(Debug, Default, Deserialize)]
pub struct ForwardBody {
    #[serde(rename = "toMasked", default, deserialize_with = "string_field")]
    pub to_masked: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "string_field")]
    pub message: Option<String>,
}

impl From<ForwardBody> for ForwardRequest {
    fn from(body: ForwardBody) -> Self {
        ForwardRequest {
            to_masked: body.to_masked.unwrap_or_default(),
            subject: body.subject.unwrap_or_default(),
            message: body.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardResponse {
    pub success: bool,
}

/// Forward a message addressed to a masked alias
pub async fn handler(
    State(ctx): State<Arc<ApiContext>>,
    body: Bytes,
) -> Result<Json<ForwardResponse>, ApiError> {
    let request = ForwardRequest::from(decode::<ForwardBody>(&body));
    ctx.forwarder.forward(&request).await?;

    Ok(Json(ForwardResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults() {
        let body: ForwardBody = serde_json::from_str(r#"{"toMasked":"x@maskmail.io"}"#).unwrap();
        let request = ForwardRequest::from(body);
        assert_eq!(request.to_masked, "x@maskmail.io");
        assert_eq!(request.subject, "");
        assert_eq!(request.message, "");
    }
}
