//! Customer handlers
//!
//! Lookups always answer 200; a miss renders the zero-valued body.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::CustomerId;

use crate::dto::customer::{CreateCustomerRequest, CustomerResponse};
use crate::{error::ApiError, AppState};

/// Registers a customer, reconciling with an existing record by cpf
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;

    let customer = state.gateway.register(request.into()).await?;
    info!(customer_id = %customer.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Gets a customer by cpf
pub async fn find_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.gateway.find_by_tax_id(&cpf).await?;
    Ok(Json(customer.into()))
}

/// Gets a customer by email
pub async fn find_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.gateway.find_by_email(&email).await?;
    Ok(Json(customer.into()))
}

/// Gets the customer linked to the bearer token's subject
pub async fn find_by_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CustomerResponse>, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or(ApiError::Unauthorized)?;
    // A header that is not visible ASCII cannot carry a token; resolve it as a miss.
    let authorization = header.to_str().unwrap_or_default();

    let customer = state.gateway.find_by_token(authorization).await?;
    Ok(Json(customer.into()))
}

/// Gets a customer by id
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.gateway.find_by_id(CustomerId::new(id)).await?;
    Ok(Json(customer.into()))
}
