use serde::{Deserialize, Serialize};

/// Incoming `POST /api/chat` body. `question` defaults to empty so a missing
/// field is reported the same way as a blank one.
#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamStatus {
    Up,
    Down,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream: UpstreamStatus,
}

impl HealthResponse {
    pub fn new(upstream: UpstreamStatus) -> Self {
        Self { status: "healthy".to_string(), upstream }
    }
}
