//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

mod auth;
mod server;
mod storage;

pub use auth::{AuthConfig, TokenEntry};
pub use server::{RateLimitConfig, ServerConfig, DEFAULT_BODY_LIMIT_BYTES};
pub use storage::{PostgresConfig, SqliteConfig, StorageConfig, StorageType};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "ESG_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "ESG";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "ESG_LOG";

use serde::Deserialize;

/// Configuration errors detected after loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("server.port must be non-zero")]
    ZeroPort,

    #[error("server.body_limit_bytes must be non-zero")]
    ZeroBodyLimit,

    #[error("server.rate_limit.window_secs must be non-zero when limiting is enabled")]
    ZeroRateLimitWindow,

    #[error("auth token for user '{0}' is empty")]
    EmptyToken(String),

    #[error("auth token maps to an empty user id")]
    EmptyUserId,

    #[error("auth token for user '{0}' is configured more than once")]
    DuplicateToken(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Accepted bearer tokens.
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config: Config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde defaults can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        let rate_limit = &self.server.rate_limit;
        if rate_limit.max_requests > 0 && rate_limit.window_secs == 0 {
            return Err(ConfigError::ZeroRateLimitWindow);
        }
        let mut seen = std::collections::HashSet::new();
        for entry in &self.auth.tokens {
            if entry.user_id.trim().is_empty() {
                return Err(ConfigError::EmptyUserId);
            }
            if entry.token.trim().is_empty() {
                return Err(ConfigError::EmptyToken(entry.user_id.clone()));
            }
            if !seen.insert(entry.token.as_str()) {
                return Err(ConfigError::DuplicateToken(entry.user_id.clone()));
            }
        }
        Ok(())
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self {
            storage: StorageConfig {
                storage_type: StorageType::Memory,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.storage_type, StorageType::Sqlite);
        assert!(config.auth.tokens.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_for_test() {
        let config = Config::for_test();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.storage_type, StorageType::Memory);
    }

    #[test]
    fn test_validate_rejects_empty_user_id() {
        let mut config = Config::default();
        config.auth.tokens.push(TokenEntry {
            token: "tok".to_string(),
            user_id: " ".to_string(),
        });
        assert!(matches!(config.validate(), Err(ConfigError::EmptyUserId)));
    }

    #[test]
    fn test_validate_rejects_duplicate_token() {
        let mut config = Config::default();
        for user_id in ["a", "b"] {
            config.auth.tokens.push(TokenEntry {
                token: "shared".to_string(),
                user_id: user_id.to_string(),
            });
        }
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateToken(_))));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPort)));
    }

    #[test]
    fn test_validate_rejects_zero_rate_limit_window() {
        let mut config = Config::default();
        config.server.rate_limit.window_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroRateLimitWindow)
        ));

        config.server.rate_limit.max_requests = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = r#"
server:
  port: 9000
storage:
  type: postgres
  postgres:
    uri: postgres://db:5432/esg
auth:
  tokens:
    - token: Secret-Token
      user_id: user-42
"#;
        let config: Config = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origin, "http://localhost:3000");
        assert_eq!(config.storage.storage_type, StorageType::Postgres);
        assert_eq!(config.storage.postgres.uri, "postgres://db:5432/esg");
        assert_eq!(config.auth.tokens[0].token, "Secret-Token");
        assert_eq!(config.auth.tokens[0].user_id, "user-42");
    }

    #[test]
    #[serial]
    fn test_load_from_file_and_env() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "server:\n  port: 9100\nstorage:\n  type: memory").expect("write config");

        std::env::set_var("ESG__SERVER__HOST", "127.0.0.1");
        let config = Config::load(file.path().to_str());
        std::env::remove_var("ESG__SERVER__HOST");

        let config = config.expect("config loads");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.storage_type, StorageType::Memory);
    }

    #[test]
    #[serial]
    fn test_load_missing_required_file_fails() {
        let result = Config::load(Some("/nonexistent/esg-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
