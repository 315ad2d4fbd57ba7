use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_core::errors::CONNECT_BANNER;
use chat_core::AskResponse;
use thiserror::Error;

/// Errors the host can produce while relaying a question.
/// Every variant renders as the `{success: false, error}` body the widget expects.
#[derive(Debug, Error)]
pub enum HostError {
    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Question is required")]
    MissingQuestion,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ── Upstream errors ──────────────────────────────────────────────────────
    #[error("QA service unavailable at {host}")]
    UpstreamUnavailable {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("QA service returned an unreadable response: {message}")]
    UpstreamDecode { message: String },

    // ── Startup errors ───────────────────────────────────────────────────────
    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl HostError {
    pub fn is_validation(&self) -> bool {
        matches!(self, HostError::MissingQuestion | HostError::InvalidBody(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, HostError::UpstreamUnavailable { .. } | HostError::UpstreamDecode { .. })
    }

    pub fn status(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else if self.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Text sent to the widget. Upstream failures carry addresses and raw
    /// client errors, so those stay in the logs.
    pub fn public_message(&self) -> String {
        if self.is_upstream() {
            CONNECT_BANNER.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        (self.status(), Json(AskResponse::failure(self.public_message()))).into_response()
    }
}
