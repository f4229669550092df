//! Customer handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CustomerId;
use domain_customer::{CreateCustomerRequest, CustomerStats, CustomerView, UpdateCustomerRequest};

use crate::extract::ValidatedJson;
use crate::{error::ApiError, AppState};

fn parse_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid customer ID: {raw}")))
}

/// Creates a customer
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<Json<CustomerView>, ApiError> {
    let view = state.customers.create(&request).await?;
    Ok(Json(view))
}

/// Lists every customer, newest first
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerView>>, ApiError> {
    Ok(Json(state.customers.get_all().await?))
}

/// Gets a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerView>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.customers.get_by_id(id).await?))
}

/// Applies a partial update
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerView>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.customers.update(id, &request).await?))
}

/// Deletes a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.customers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Age statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<CustomerStats>, ApiError> {
    Ok(Json(state.customers.get_stats().await?))
}

/// Mean age, `null` when there are no customers
pub async fn get_average_age(State(state): State<AppState>) -> Result<Json<Option<f64>>, ApiError> {
    Ok(Json(state.customers.get_average_age().await?))
}

/// Population standard deviation of ages, `null` when there are no customers
pub async fn get_age_standard_deviation(
    State(state): State<AppState>,
) -> Result<Json<Option<f64>>, ApiError> {
    Ok(Json(state.customers.get_age_standard_deviation().await?))
}
