//! API error type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No upstream API key configured.
    #[error("Missing API Key")]
    MissingApiKey,
    /// Bad query parameter.
    #[error("{0}")]
    BadRequest(String),
    /// Upstream answered with a non-success status.
    #[error("Failed to fetch data")]
    Upstream { status: u16, body: String },
    /// Upstream could not be reached.
    #[error("Failed to fetch data")]
    Transport(String),
    /// Upstream answered 2xx with an unusable body.
    #[error("Malformed upstream response")]
    MalformedUpstream(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedUpstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            Self::Upstream { body, .. } => Some(body.clone()),
            Self::MalformedUpstream(reason) => Some(reason.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::MalformedUpstream(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingApiKey.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Upstream { status: 429, body: String::new() }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Upstream { status: 42, body: String::new() }.status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::Transport("reset".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_key_body_has_no_details() {
        let body = ErrorResponse {
            error: ApiError::MissingApiKey.to_string(),
            details: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Missing API Key"}"#);
    }
}
