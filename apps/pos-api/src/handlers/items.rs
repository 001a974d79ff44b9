//! Item catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use tillpoint_core::validation::{validate_item_name, validate_stock, validate_unit_price_cents};
use tillpoint_core::{Item, NewItem};

fn validate(item: &NewItem) -> Result<(), ApiError> {
    validate_item_name(&item.name)?;
    validate_unit_price_cents(item.unit_price_cents)?;
    validate_stock(item.stock)?;
    Ok(())
}

/// GET /items
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Item>>>, ApiError> {
    let items = state.db.items().find_all().await?;

    Ok(Json(ApiResponse::new("Records retrieved successfully", items)))
}

/// GET /items/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let item = state
        .db
        .items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {id}")))?;

    Ok(Json(ApiResponse::new("Record fetched successfully", item)))
}

/// POST /items
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewItem>,
) -> Result<(StatusCode, Json<ApiResponse<Item>>), ApiError> {
    validate(&req)?;

    let item = state.db.items().insert(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Record created successfully", item)),
    ))
}

/// PUT /items/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewItem>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    validate(&req)?;

    state.db.items().update(id, &req).await?;

    let item = Item {
        id,
        name: req.name,
        unit_price_cents: req.unit_price_cents,
        stock: req.stock,
    };

    Ok(Json(ApiResponse::new("Record updated successfully", item)))
}

/// DELETE /items/:id
///
/// Items referenced by a bill line cannot be removed; the foreign key
/// surfaces as a 409.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.db.items().delete(id).await?;

    Ok(Json(ApiResponse::new("Record deleted successfully", ())))
}
