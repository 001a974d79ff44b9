//! Customer handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use tillpoint_core::validation::{validate_person_name, validate_phone};
use tillpoint_core::{Customer, NewCustomer, ValidationError};

fn validate(customer: &NewCustomer) -> Result<(), ApiError> {
    validate_person_name("first name", &customer.first_name)?;
    validate_person_name("last name", &customer.last_name)?;
    validate_phone(&customer.phone)?;
    Ok(())
}

/// Rejects a phone number already registered to a different customer.
async fn ensure_phone_free(
    state: &AppState,
    phone: &str,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    if let Some(existing) = state.db.customers().get_by_phone(phone).await? {
        if Some(existing.id) != exclude_id {
            return Err(ValidationError::Duplicate {
                field: "phone".to_string(),
                value: phone.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// GET /customers
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, ApiError> {
    let customers = state.db.customers().find_all().await?;

    Ok(Json(ApiResponse::new("Records retrieved successfully", customers)))
}

/// GET /customers/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer not found: {id}")))?;

    Ok(Json(ApiResponse::new("Record fetched successfully", customer)))
}

/// POST /customers
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewCustomer>,
) -> Result<(StatusCode, Json<ApiResponse<Customer>>), ApiError> {
    validate(&req)?;
    ensure_phone_free(&state, &req.phone, None).await?;

    let customer = state.db.customers().insert(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Record created successfully", customer)),
    ))
}

/// PUT /customers/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewCustomer>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    validate(&req)?;
    ensure_phone_free(&state, &req.phone, Some(id)).await?;

    state.db.customers().update(id, &req).await?;

    let customer = Customer {
        id,
        first_name: req.first_name,
        last_name: req.last_name,
        address: req.address,
        phone: req.phone,
    };

    Ok(Json(ApiResponse::new("Record updated successfully", customer)))
}

/// DELETE /customers/:id
///
/// Customers with bills on record cannot be removed; the foreign key
/// surfaces as a 409.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.db.customers().delete(id).await?;

    Ok(Json(ApiResponse::new("Record deleted successfully", ())))
}
