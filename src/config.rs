use std::path::PathBuf;
use std::time::Duration;

use crate::errors::HostError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_URL: &str = "http://localhost:5000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Host settings, read from the environment after `.env` has been loaded.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub port: u16,
    /// Base URL of the QA service; `/api/chat` and `/api/health` are appended.
    pub upstream_url: String,
    /// Built widget (`trunk build --release` output).
    pub static_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl HostConfig {
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;

        Ok(Self {
            port,
            upstream_url: lookup("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, HostError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| HostError::InvalidConfig {
            key: key.to_string(),
            value,
        }),
    }
}
