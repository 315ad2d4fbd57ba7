use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Citation returned next to an answer. The QA service sends either a page
/// label (`"12"`, `"N/A"`) or a bare page number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePage {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for SourcePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePage::Number(n) => write!(f, "{n}"),
            SourcePage::Text(s) => f.write_str(s),
        }
    }
}

impl SourcePage {
    pub fn page(number: u32) -> Self {
        SourcePage::Number(number.into())
    }
}

impl From<&str> for SourcePage {
    fn from(label: &str) -> Self {
        SourcePage::Text(label.to_string())
    }
}

/// One turn in the conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourcePage>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), source: None, error: false }
    }

    pub fn assistant(content: impl Into<String>, source: Option<SourcePage>) -> Self {
        Self { role: Role::Assistant, content: content.into(), source, error: false }
    }

    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into(), source: None, error: true }
    }

    /// Source to display, if any. Error turns, blank labels and page 0 show none.
    pub fn visible_source(&self) -> Option<&SourcePage> {
        if self.error {
            return None;
        }
        self.source.as_ref().filter(|s| match s {
            SourcePage::Text(t) => !t.trim().is_empty(),
            SourcePage::Number(n) => n.as_f64() != Some(0.0),
        })
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Response of `POST /api/chat`, as defined by the QA service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<SourcePage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn answered(answer: impl Into<String>, source_page: Option<SourcePage>) -> Self {
        Self { success: true, answer: Some(answer.into()), source_page, error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, answer: None, source_page: None, error: Some(error.into()) }
    }
}
