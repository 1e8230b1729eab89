use std::env;

use auth::AuthSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[REDACTED]")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("hash_iterations", &self.hash_iterations)
            .finish()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_token_ttl_minutes() -> i64 {
    60
}

fn default_hash_iterations() -> u32 {
    auth::PasswordHasher::DEFAULT_ITERATIONS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, AUTH__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Immutable settings for the credential/token core.
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings::new(self.auth.secret.as_bytes())
            .with_token_ttl(chrono::Duration::minutes(self.auth.token_ttl_minutes))
            .with_hash_iterations(self.auth.hash_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/course_platform".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 8080 },
            auth: AuthConfig {
                secret: "config-test-secret".to_string(),
                token_ttl_minutes: 15,
                hash_iterations: 2_000,
            },
        }
    }

    #[test]
    fn test_auth_settings() {
        let settings = config().auth_settings();

        assert_eq!(settings.secret, b"config-test-secret".to_vec());
        assert_eq!(settings.token_ttl, chrono::Duration::minutes(15));
        assert_eq!(settings.hash_iterations, 2_000);
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", config());
        assert!(!debug.contains("config-test-secret"));
    }
}
