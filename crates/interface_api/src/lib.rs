//! HTTP API Layer
//!
//! REST API for customer registration and identity lookups, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one per gateway operation, plus health checks
//! - **Middleware**: request ids, tracing, request logging
//! - **DTOs**: wire-format request and response bodies
//! - **Error Handling**: consistent `{ "error", "message" }` responses
//!
//! # Routes
//!
//! | method | path                    |
//! |--------|-------------------------|
//! | POST   | `/cliente`              |
//! | GET    | `/cliente/cpf/:cpf`     |
//! | GET    | `/cliente/email/:email` |
//! | GET    | `/cliente/token`        |
//! | GET    | `/cliente/:id`          |
//! | GET    | `/health`, `/health/ready` |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(gateway));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_customer::IdentityGateway;

use crate::handlers::{customer, health};
use crate::middleware::request_logging;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<IdentityGateway>,
}

/// Creates the main API router
pub fn create_router(gateway: Arc<IdentityGateway>) -> Router {
    let state = AppState { gateway };

    let customer_routes = Router::new()
        .route("/", post(customer::register))
        .route("/cpf/:cpf", get(customer::find_by_cpf))
        .route("/email/:email", get(customer::find_by_email))
        .route("/token", get(customer::find_by_token))
        .route("/:id", get(customer::find_by_id));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/cliente", customer_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
