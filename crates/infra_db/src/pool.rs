//! PostgreSQL connection pool
//!
//! The customer service runs one pool per process. Its size and timeouts come
//! from the server configuration; everything else keeps SQLx defaults.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::error::DatabaseError;

pub type DatabasePool = PgPool;

/// Pool settings for the customer store
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connections opened eagerly and kept warm; capped at `max_connections`
    pub min_connections: u32,
    /// How long a query waits for a free connection before failing
    pub acquire_timeout: Duration,
    /// Idle connections above `min_connections` are closed after this long;
    /// `None` keeps them open
    pub idle_timeout: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Some(Duration::from_secs(600)),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        let min_connections = if self.min_connections > self.max_connections {
            warn!(
                min_connections = self.min_connections,
                max_connections = self.max_connections,
                "min_connections exceeds max_connections, capping"
            );
            self.max_connections
        } else {
            self.min_connections
        };

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }
}

// The URL carries credentials
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

/// Connects the pool, failing fast if the database is unreachable
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        acquire_timeout_ms = config.acquire_timeout.as_millis() as u64,
        "Connecting to customer database"
    );

    let pool = config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Customer database pool ready");
    Ok(pool)
}
