//! Customer API - Server Binary
//!
//! Starts the HTTP API server for customer registration and lookups.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin customer-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin customer-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_DB_MIN_CONNECTIONS` - Connections kept open while idle (default: 1)
//! * `API_DB_ACQUIRE_TIMEOUT_SECS` - Wait for a free connection (default: 5)
//! * `API_DB_IDLE_TIMEOUT_SECS` - Idle connection lifetime, 0 = forever (default: 600)
//! * `API_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_TOKEN_SECRET` - HS256 secret for verifying bearer tokens
//! * `API_TOKEN_PUBLIC_KEY_PEM` - RS256 public key for verifying bearer tokens

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_customer::{IdentityGateway, TokenResolver};
use infra_db::{create_pool, PostgresCustomerAdapter};
use interface_api::{config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Customer API Server"
    );

    let pool = create_pool(&config.database_config())
        .await
        .context("failed to connect to database")?;

    let tokens = TokenResolver::new(config.token_verification())
        .context("invalid token verification key")?;
    if !tokens.verifies_signatures() {
        tracing::warn!(
            "Bearer token signatures are not verified; set API_TOKEN_SECRET or API_TOKEN_PUBLIC_KEY_PEM unless an upstream gateway verifies them"
        );
    }

    let gateway = IdentityGateway::new(Arc::new(PostgresCustomerAdapter::new(pool)), tokens);
    let app = create_router(Arc::new(gateway));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` overrides `log_level`
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
