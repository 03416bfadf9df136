use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Upstream open-data endpoint queried by the proxy. The credential pair is
/// the agency's published open-data key, embedded server-side.
pub const DEFAULT_UPSTREAM_URL: &str = "https://wic.heo.taipei/OpenData/API/Rain/Get";
pub const DEFAULT_LOGIN_ID: &str = "open_rain";
pub const DEFAULT_DATA_KEY: &str = "85452C1D";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub url: Option<String>,
    pub login_id: Option<String>,
    pub data_key: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: Option<HttpConfig>,
    pub upstream: Option<UpstreamConfig>,
    pub poll: Option<PollConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from RAINWATCH_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RAINWATCH_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let cfg = if Path::new(&path).exists() {
            let s = fs::read_to_string(&path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }

    pub fn upstream_url(&self) -> String {
        self.upstream
            .as_ref()
            .and_then(|u| u.url.clone())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string())
    }

    pub fn upstream_login_id(&self) -> String {
        self.upstream
            .as_ref()
            .and_then(|u| u.login_id.clone())
            .unwrap_or_else(|| DEFAULT_LOGIN_ID.to_string())
    }

    pub fn upstream_data_key(&self) -> String {
        self.upstream
            .as_ref()
            .and_then(|u| u.data_key.clone())
            .unwrap_or_else(|| DEFAULT_DATA_KEY.to_string())
    }

    /// Server-side cache lifetime for the proxied payload (default 300s)
    pub fn cache_ttl(&self) -> Duration {
        let secs = self
            .upstream
            .as_ref()
            .and_then(|u| u.cache_ttl_secs)
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        Duration::from_secs(secs)
    }

    /// Upstream request timeout (default 10s)
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .upstream
            .as_ref()
            .and_then(|u| u.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// View polling cadence (default 300s)
    pub fn poll_interval(&self) -> Duration {
        let secs = self
            .poll
            .as_ref()
            .and_then(|p| p.interval_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        Duration::from_secs(secs)
    }
}
