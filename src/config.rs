use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Answer every confirmation prompt with yes.
    pub assume_yes: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout_secs: u64, assume_yes: bool) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).with_context(|| format!("invalid backend URL: {}", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("backend URL must be http or https: {}", base_url);
        }
        if timeout_secs == 0 {
            bail!("timeout must be at least one second");
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: Duration::from_secs(timeout_secs),
            assume_yes,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            assume_yes: false,
        }
    }
}
