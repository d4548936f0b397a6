use crate::error::{QrError, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

/// Local backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9091";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Host and port of the front-end dev server; pages served from it talk to
/// the local backend instead of their own origin.
const DEV_SERVER: (&str, u16) = ("localhost", 4200);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: None,
            timeout_secs: None,
            max_retries: None,
            retry_backoff_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("QR_API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let timeout_secs = env::var("QR_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());
        let max_retries = env::var("QR_API_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok());
        let retry_backoff_ms = env::var("QR_API_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|s| s.parse().ok());

        ClientConfig {
            base_url,
            timeout_secs,
            max_retries,
            retry_backoff_ms,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Picks the backend address the way a page served from `origin` would.
    pub fn with_origin(mut self, origin: &str) -> Result<Self> {
        self.base_url = Some(base_url_for_origin(origin)?);
        Ok(self)
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = Some(max_retries);
        self.retry_backoff_ms = Some(backoff_ms);
        self
    }

    /// Validated base address without a trailing slash.
    pub fn resolved_base_url(&self) -> Result<String> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim();
        let parsed = Url::parse(raw)
            .map_err(|e| QrError::ConfigError(format!("Invalid base URL '{}': {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(QrError::ConfigError(format!(
                "Base URL '{}' must use http or https",
                raw
            )));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.unwrap_or(0))
    }
}

pub fn base_url_for_origin(origin: &str) -> Result<String> {
    let parsed = Url::parse(origin.trim())
        .map_err(|e| QrError::ConfigError(format!("Invalid origin '{}': {}", origin, e)))?;

    let is_dev_server =
        parsed.host_str() == Some(DEV_SERVER.0) && parsed.port() == Some(DEV_SERVER.1);
    if is_dev_server {
        return Ok(DEFAULT_BASE_URL.to_string());
    }
    Ok(parsed.origin().ascii_serialization())
}
