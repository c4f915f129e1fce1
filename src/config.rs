//! Client configuration.
//!
//! Transforms CLI arguments into a validated configuration for talking to
//! the merge service: where it lives, how long requests may take, and how
//! chatty the output should be.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default service address, matching the service's development default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the merge service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Suppress all non-error output.
    pub quiet: bool,
    /// Show detailed output.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            quiet: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Build a configuration from raw CLI values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a malformed URL or a zero
    /// timeout.
    pub fn new(base_url: &str, timeout_secs: u64, quiet: bool, verbose: bool) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        if timeout_secs == 0 {
            return Err(Error::invalid_config("timeout must be at least 1 second"));
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            quiet,
            verbose,
        })
    }

    /// Build the absolute URL for an endpoint path like `/reorder`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Check the URL scheme and strip any trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::invalid_config("service URL must not be empty"));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(Error::invalid_config(format!(
            "service URL must start with http:// or https://, got: {url}"
        )));
    }
    Ok(trimmed.to_string())
}
