//! API configuration

use std::time::Duration;

use serde::Deserialize;

use domain_customer::TokenVerification;
use infra_db::DatabaseConfig;

/// API configuration
///
/// Every field has a default; `API_*` environment variables override them.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum connections held by the database pool
    pub db_max_connections: u32,
    /// Connections the pool keeps open while idle
    pub db_min_connections: u32,
    /// Seconds a request waits for a free connection
    pub db_acquire_timeout_secs: u64,
    /// Seconds before an idle connection is closed; 0 keeps it open
    pub db_idle_timeout_secs: u64,
    /// Log level, used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// HS256 secret used to verify bearer tokens
    pub token_secret: Option<String>,
    /// RS256 public key (PEM) used to verify bearer tokens
    pub token_public_key_pem: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/customers".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            db_acquire_timeout_secs: 5,
            db_idle_timeout_secs: 600,
            log_level: "info".to_string(),
            log_json: false,
            token_secret: None,
            token_public_key_pem: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for the customer database
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
            idle_timeout: (self.db_idle_timeout_secs > 0)
                .then(|| Duration::from_secs(self.db_idle_timeout_secs)),
        }
    }

    /// Selects how bearer token signatures are checked
    ///
    /// A configured public key takes precedence over a shared secret. With
    /// neither set, tokens are decoded without verification.
    pub fn token_verification(&self) -> TokenVerification {
        match (non_blank(&self.token_public_key_pem), non_blank(&self.token_secret)) {
            (Some(pem), _) => TokenVerification::RsaPublicKeyPem(pem.to_string()),
            (None, Some(secret)) => TokenVerification::SharedSecret(secret.to_string()),
            (None, None) => TokenVerification::Unverified,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("db_idle_timeout_secs", &self.db_idle_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("token_verification", &self.token_verification())
            .finish_non_exhaustive()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(matches!(config.token_verification(), TokenVerification::Unverified));
    }

    #[test]
    fn test_database_config_carries_pool_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/customers".to_string(),
            db_max_connections: 20,
            db_min_connections: 4,
            db_acquire_timeout_secs: 2,
            db_idle_timeout_secs: 0,
            ..ApiConfig::default()
        };
        let db = config.database_config();

        assert_eq!(db.url, "postgres://db/customers");
        assert_eq!(db.max_connections, 20);
        assert_eq!(db.min_connections, 4);
        assert_eq!(db.acquire_timeout, Duration::from_secs(2));
        assert_eq!(db.idle_timeout, None);

        let db = ApiConfig::default().database_config();
        assert_eq!(db.idle_timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_public_key_wins_over_secret() {
        let config = ApiConfig {
            token_secret: Some("secret".to_string()),
            token_public_key_pem: Some("-----BEGIN PUBLIC KEY-----".to_string()),
            ..ApiConfig::default()
        };
        assert!(matches!(
            config.token_verification(),
            TokenVerification::RsaPublicKeyPem(_)
        ));
    }

    #[test]
    fn test_blank_secret_means_unverified() {
        let config = ApiConfig {
            token_secret: Some("  ".to_string()),
            ..ApiConfig::default()
        };
        assert!(matches!(config.token_verification(), TokenVerification::Unverified));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = ApiConfig {
            database_url: "postgres://user:hunter2@db/customers".to_string(),
            token_secret: Some("s3cr3t".to_string()),
            ..ApiConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cr3t"));
    }
}
