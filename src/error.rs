use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Unknown chain: {0}")]
    UnknownChain(u64),
}

impl FeeError {
    fn error_code(&self) -> (StatusCode, &'static str) {
        match self {
            FeeError::UnknownChain(_) => (StatusCode::NOT_FOUND, "UNKNOWN_CHAIN"),
            FeeError::Transport(_)
            | FeeError::UpstreamStatus { .. }
            | FeeError::MalformedResponse(_)
            | FeeError::OutOfRange(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for FeeError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.error_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        };

        tracing::error!(
            error = ?self,
            error_code = error_code,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            FeeError::UnknownChain(5).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            FeeError::OutOfRange("2e18".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            FeeError::UpstreamStatus { status: 503, body: String::new() }
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
