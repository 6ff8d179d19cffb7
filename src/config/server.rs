//! HTTP server configuration types.

use serde::Deserialize;

/// Default request body limit, matching the questionnaire form's size.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port for the REST API.
    pub port: u16,
    /// Origin allowed by CORS (the dashboard).
    pub cors_origin: String,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
    /// Per-client request limit.
    pub rate_limit: RateLimitConfig,
}

/// Fixed-window request limit per client IP.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window. 0 disables limiting.
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origin: "http://localhost:3000".to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
