//! Bill handlers.
//!
//! Thin translations over [`BillingService`]; all cross-entity rules live
//! there. The acting user id comes from the authenticated token, never
//! the request body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use tillpoint_billing::{BillDto, BillLineDto, CreateBillRequest};

/// POST /bills - create a bill for the authenticated staff user.
pub async fn create_bill(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BillDto>>), ApiError> {
    let bill = state.billing.create_bill(auth.id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Bill created successfully", bill)),
    ))
}

/// GET /bills - all bill headers, newest first.
pub async fn list_bills(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BillDto>>>, ApiError> {
    let bills = state.billing.list_bills().await?;

    Ok(Json(ApiResponse::new("Records retrieved successfully", bills)))
}

/// GET /bills/:id - one bill with its lines.
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BillDto>>, ApiError> {
    let bill = state.billing.get_bill(id).await?;

    Ok(Json(ApiResponse::new("Record fetched successfully", bill)))
}

/// GET /bills/:id/items - only the line items of a bill.
pub async fn bill_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<BillLineDto>>>, ApiError> {
    let lines = state.billing.lines_for_bill(id).await?;

    Ok(Json(ApiResponse::new("Records retrieved successfully", lines)))
}
