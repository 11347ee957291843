use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for auth-service.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub profile_service: ProfileServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// The secret is handed to the authenticator at startup and nowhere else.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

/// Profile service client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ProfileServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProfileServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_expiration_hours() -> i64 {
    auth::jwt::DEFAULT_TOKEN_LIFETIME_HOURS
}

fn default_issuer() -> String {
    auth::jwt::DEFAULT_ISSUER.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required values are missing or invalid: an empty JWT
    /// secret, a token lifetime outside `1..=MAX_TOKEN_LIFETIME_HOURS`, or a
    /// zero profile service timeout
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".to_string(),
            ));
        }
        if self.jwt.expiration_hours > auth::jwt::MAX_TOKEN_LIFETIME_HOURS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must not exceed {}",
                auth::jwt::MAX_TOKEN_LIFETIME_HOURS
            )));
        }
        if self.profile_service.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "profile_service.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.jwt.secret.len() < 32 {
            tracing::warn!(
                length = self.jwt.secret.len(),
                "jwt.secret is shorter than 32 bytes"
            );
        }
        Ok(())
    }
}
