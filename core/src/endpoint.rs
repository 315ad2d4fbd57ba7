//! Where the widget sends its questions.
//!
//! A co-located deployment serves the widget and `/api/chat` from the same
//! origin, so a relative path is enough. During development the widget runs
//! on its own dev server and talks to the QA service on localhost directly.

pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/health";
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Production,
    Development,
}

impl Profile {
    /// Release builds are production builds.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Profile::Development
        } else {
            Profile::Production
        }
    }
}

/// Chat endpoint for `profile`. A non-blank `override_url` wins over both.
pub fn chat_endpoint(profile: Profile, override_url: Option<&str>) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    match profile {
        Profile::Production => CHAT_PATH.to_string(),
        Profile::Development => join(DEVELOPMENT_ORIGIN, CHAT_PATH),
    }
}

/// Joins a base URL and an absolute path without doubling the slash.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_pick_relative_or_local_url() {
        assert_eq!(chat_endpoint(Profile::Production, None), "/api/chat");
        assert_eq!(chat_endpoint(Profile::Development, None), "http://localhost:5000/api/chat");
    }

    #[test]
    fn override_wins_unless_blank() {
        assert_eq!(
            chat_endpoint(Profile::Production, Some("https://qa.example.org/api/chat")),
            "https://qa.example.org/api/chat"
        );
        assert_eq!(chat_endpoint(Profile::Production, Some("  ")), "/api/chat");
    }

    #[test]
    fn join_handles_trailing_slashes() {
        assert_eq!(join("http://up:5000/", "/api/chat"), "http://up:5000/api/chat");
        assert_eq!(join("http://up:5000", "api/health"), "http://up:5000/api/health");
    }
}
