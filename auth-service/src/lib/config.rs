use std::env;

use auth::lockout::DEFAULT_LOCK_DURATION_MINUTES;
use auth::lockout::DEFAULT_MAX_FAILED_ATTEMPTS;
use auth::LockoutPolicy;
use auth::TokenConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub lockout: LockoutConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

/// Credential store connection. Without a URL the service keeps accounts in memory.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(
            self.secret.as_bytes(),
            chrono::Duration::hours(self.expiration_hours),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LockoutConfig {
    pub max_failed_attempts: u32,
    pub lock_duration_minutes: i64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            lock_duration_minutes: DEFAULT_LOCK_DURATION_MINUTES,
        }
    }
}

impl LockoutConfig {
    pub fn policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(
            self.max_failed_attempts,
            chrono::Duration::minutes(self.lock_duration_minutes),
        )
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecurityConfig {
    /// Report unknown accounts as invalid credentials to avoid email enumeration.
    #[serde(default)]
    pub conceal_unknown_accounts: bool,
    /// Enforce character-class rules on registration passwords.
    #[serde(default)]
    pub require_strong_passwords: bool,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: LOCKOUT__MAX_FAILED_ATTEMPTS=5 overrides lockout.max_failed_attempts
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_defaults_match_policy_defaults() {
        assert_eq!(LockoutConfig::default().policy(), LockoutPolicy::default());
    }

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let jwt = JwtConfig {
            secret: "do-not-print-me".to_string(),
            expiration_hours: 24,
        };

        let rendered = format!("{:?}", jwt);
        assert!(!rendered.contains("do-not-print-me"));
        assert_eq!(jwt.token_config().ttl, chrono::Duration::hours(24));
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let configuration = ConfigBuilder::builder()
            .set_override("server.http_port", 9000)
            .unwrap()
            .set_override("jwt.secret", "secret")
            .unwrap()
            .set_override("jwt.expiration_hours", 1)
            .unwrap()
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.server.http_port, 9000);
        assert!(config.database.url.is_none());
        assert_eq!(config.lockout.max_failed_attempts, 3);
        assert!(!config.security.conceal_unknown_accounts);
    }
}
