use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::error::{Result, YtdError};

pub const DEFAULT_PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WORKERS: usize = 4;

/// Where and how the player API is reached
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub endpoint: Url,
    /// Appended as the `key` query parameter when present
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| YtdError::InvalidUrl(format!("{endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(YtdError::InvalidUrl(format!(
                "Player endpoint must be http(s): {endpoint}"
            )));
        }

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full player URL including the API key
    pub fn player_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Runtime worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }
        if self.workers == 0 {
            anyhow::bail!("At least one worker thread is required");
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }
}
