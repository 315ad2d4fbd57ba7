use std::time::Duration;

use axum::http::StatusCode;
use chat_core::endpoint::{self, CHAT_PATH, HEALTH_PATH};
use chat_core::{AskRequest, AskResponse};
use tracing::{debug, error, warn};

use crate::errors::HostError;

/// Forwards questions to the QA service. Holds no conversation state; the
/// widget owns all of that.
#[derive(Clone)]
pub struct RelayService {
    client: reqwest::Client,
    upstream_url: String,
}

impl RelayService {
    pub fn new(upstream_url: &str, timeout: Duration) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HostError::HttpClient)?;
        Ok(Self { client, upstream_url: upstream_url.to_string() })
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Relays one question and returns the upstream's status and body as-is.
    pub async fn ask(&self, request: AskRequest) -> Result<(StatusCode, AskResponse), HostError> {
        if request.question.trim().is_empty() {
            return Err(HostError::MissingQuestion);
        }

        let url = endpoint::join(&self.upstream_url, CHAT_PATH);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("QA service request to {url} failed: {e}");
                HostError::UpstreamUnavailable { host: self.upstream_url.clone(), source: e }
            })?;

        let status =
            StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body: AskResponse = response.json().await.map_err(|e| {
            warn!("QA service sent an unreadable body (status {status}): {e}");
            HostError::UpstreamDecode { message: e.to_string() }
        })?;

        debug!(%status, success = body.success, "QA service answered");
        Ok((status, body))
    }

    /// `true` when the QA service's health endpoint answers with a 2xx.
    pub async fn upstream_healthy(&self) -> bool {
        let url = endpoint::join(&self.upstream_url, HEALTH_PATH);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("QA service health check failed: {e}");
                false
            }
        }
    }
}
