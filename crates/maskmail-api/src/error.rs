/// API Error types
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maskmail_core::{DenyReason, MaskmailError};
use serde_json::json;
use tracing::error;

/// API Error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gone: {0}")]
    Gone(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Gone(_) => StatusCode::GONE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Gone(msg)
            | ApiError::Internal(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convert maskmail-core errors to API errors
impl From<MaskmailError> for ApiError {
    fn from(err: MaskmailError) -> Self {
        match err {
            MaskmailError::InvalidInput(msg) => ApiError::BadRequest(msg),
            MaskmailError::NotFound(_) => ApiError::NotFound(DenyReason::NotFound.to_string()),
            MaskmailError::Expired(_) => ApiError::Gone(DenyReason::Expired.to_string()),
            MaskmailError::Transport(_) => {
                ApiError::Internal(DenyReason::TransportFailure.to_string())
            }
            other => {
                error!(error = %other, "Unhandled service error");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (MaskmailError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (MaskmailError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (MaskmailError::Expired("x".into()), StatusCode::GONE),
            (
                MaskmailError::Transport("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                MaskmailError::AliasExhausted("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_messages_do_not_leak_internals() {
        let err = ApiError::from(MaskmailError::Transport("535 auth failed for svc".into()));
        assert_eq!(err.to_string(), "Internal server error: Failed to forward email.");

        let err = ApiError::from(MaskmailError::InvalidInput("Real email required.".into()));
        assert_eq!(err.to_string(), "Bad request: Real email required.");
    }
}
