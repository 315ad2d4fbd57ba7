use thiserror::Error;

use crate::models::AskResponse;

/// Banner text for any failure to reach the QA service. The host also sends it
/// as the `error` of its own gateway failures, so nothing internal leaks out.
pub const CONNECT_BANNER: &str = "Failed to connect to the server";
const CONNECT_CHAT: &str =
    "Failed to connect to the server. Please check your connection and try again.";

/// Every way a question can fail to produce an answer.
///
/// The variants only matter for logging. Whatever the cause, the widget shows
/// a banner and an assistant error turn built from [`ChatError::banner_text`]
/// and [`ChatError::chat_text`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The QA service answered, but reported a failure.
    #[error("Backend reported failure: {}", message.as_deref().unwrap_or("no details"))]
    Backend { message: Option<String> },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// A response arrived but its body was not the expected JSON.
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ChatError {
    pub fn backend(message: Option<String>) -> Self {
        ChatError::Backend { message: message.filter(|m| !m.trim().is_empty()) }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_) | ChatError::Decode(_))
    }

    /// Text for the dismissible error banner.
    pub fn banner_text(&self) -> String {
        match self {
            ChatError::Backend { message } => {
                message.clone().unwrap_or_else(|| "An error occurred".to_string())
            }
            ChatError::Transport(_) | ChatError::Decode(_) => CONNECT_BANNER.to_string(),
        }
    }

    /// Text for the assistant error turn appended to the conversation.
    pub fn chat_text(&self) -> String {
        match self {
            ChatError::Backend { message } => format!(
                "Sorry, I encountered an error: {}. Please try again.",
                message.as_deref().unwrap_or("Unknown error")
            ),
            ChatError::Transport(_) | ChatError::Decode(_) => CONNECT_CHAT.to_string(),
        }
    }
}

/// Reads a `/api/chat` reply.
///
/// The body decides the outcome, whatever the status, except that a failure
/// reported with a gateway status (502, 503, 504) comes from the host in front
/// of the QA service and means the service could not be reached.
pub fn read_reply(status: u16, body: &str) -> Result<AskResponse, ChatError> {
    let resp: AskResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::Decode(format!("status {status}: {e}")))?;

    if !resp.success && matches!(status, 502..=504) {
        return Err(ChatError::Transport(format!(
            "gateway status {status}: {}",
            resp.error.as_deref().unwrap_or("no details")
        )));
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failure_carries_its_message_everywhere() {
        let err = ChatError::backend(Some("not found".into()));
        assert_eq!(err.banner_text(), "not found");
        assert!(err.chat_text().contains("not found"));
        assert!(!err.is_transport());
    }

    #[test]
    fn backend_failure_without_message_uses_fallbacks() {
        let err = ChatError::backend(Some("  ".into()));
        assert_eq!(err.banner_text(), "An error occurred");
        assert_eq!(err.chat_text(), "Sorry, I encountered an error: Unknown error. Please try again.");
    }

    #[test]
    fn transport_and_decode_read_the_same_to_the_user() {
        let a = ChatError::Transport("connection refused".into());
        let b = ChatError::Decode("expected value at line 1".into());
        assert_eq!(a.banner_text(), b.banner_text());
        assert_eq!(a.chat_text(), b.chat_text());
        assert!(a.chat_text().starts_with("Failed to connect to the server"));
    }

    #[test]
    fn gateway_failure_reads_as_connection_problem() {
        let err = read_reply(502, r#"{"success":false,"error":"Failed to connect to the server"}"#)
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.banner_text(), CONNECT_BANNER);
        assert!(err.chat_text().contains("check your connection"));
    }

    #[test]
    fn backend_failure_status_keeps_its_message() {
        let resp = read_reply(500, r#"{"success":false,"error":"index not loaded"}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("index not loaded"));

        let ok = read_reply(200, r#"{"success":true,"answer":"X","source_page":3}"#).unwrap();
        assert!(ok.success);
    }

    #[test]
    fn unparsable_reply_is_a_decode_error() {
        let err = read_reply(200, "<html>").unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
        assert!(err.is_transport());
    }
}
