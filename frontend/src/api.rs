use chat_core::endpoint::{self, Profile};
use chat_core::errors::read_reply;
use chat_core::{AskRequest, AskResponse, ChatError};
use gloo_net::http::Request;

/// Chat endpoint baked in at build time. `CHAT_API_URL` overrides the
/// profile default (`/api/chat` in release, the local QA service otherwise).
pub fn chat_endpoint() -> String {
    endpoint::chat_endpoint(Profile::from_build(), option_env!("CHAT_API_URL"))
}

/// Posts one question. The JSON body carries the outcome; see [`read_reply`]
/// for the one case where the status matters.
pub async fn ask(url: &str, request: &AskRequest) -> Result<AskResponse, ChatError> {
    let resp = Request::post(url)
        .json(request)
        .map_err(|e| ChatError::Transport(format!("Serialize error: {e}")))?
        .send()
        .await
        .map_err(|e| ChatError::Transport(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ChatError::Transport(e.to_string()))?;

    read_reply(status, &body)
}
