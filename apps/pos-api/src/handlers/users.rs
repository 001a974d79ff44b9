//! Staff user handlers. ADMIN role required on every route.
//!
//! Plaintext passwords exist only inside this module's request types;
//! they are hashed before anything is stored, and responses are `UserDto`
//! projections that carry no password material.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use tillpoint_core::validation::{validate_password, validate_person_name, validate_username};
use tillpoint_core::{NewUser, UserRole, ValidationError};
use tillpoint_billing::UserDto;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// When absent, the stored password is kept.
    pub password: Option<String>,
    pub role: String,
}

fn require_admin(auth: &AuthUser) -> Result<(), ApiError> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You are not authorized to perform this action".to_string(),
        ))
    }
}

/// Rejects a username already taken by a different user.
async fn ensure_username_free(
    state: &AppState,
    username: &str,
    exclude_id: Option<i64>,
) -> Result<(), ApiError> {
    if let Some(existing) = state.db.users().get_by_username(username).await? {
        if Some(existing.id) != exclude_id {
            return Err(ValidationError::Duplicate {
                field: "username".to_string(),
                value: username.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// GET /users
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    require_admin(&auth)?;

    let users = state.db.users().find_all().await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();

    Ok(Json(ApiResponse::new("Records retrieved successfully", dtos)))
}

/// GET /users/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_admin(&auth)?;

    let user = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {id}")))?;

    Ok(Json(ApiResponse::new("Record fetched successfully", UserDto::from(user))))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    require_admin(&auth)?;

    validate_person_name("first name", &req.first_name)?;
    validate_person_name("last name", &req.last_name)?;
    validate_username(&req.username)?;
    validate_password(&req.password)?;
    let role = UserRole::parse(&req.role)?;

    ensure_username_free(&state, req.username.trim(), None).await?;

    let new_user = NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username.trim().to_string(),
        password_hash: auth::hash_password(&req.password)
            .map_err(|e| ApiError::Internal(e.to_string()))?,
        role,
    };

    let user = state.db.users().insert(&new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Record created successfully", UserDto::from(user))),
    ))
}

/// PUT /users/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_admin(&auth)?;

    let existing = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {id}")))?;

    validate_person_name("first name", &req.first_name)?;
    validate_person_name("last name", &req.last_name)?;
    validate_username(&req.username)?;
    let role = UserRole::parse(&req.role)?;

    ensure_username_free(&state, req.username.trim(), Some(id)).await?;

    let password_hash = match &req.password {
        Some(password) => {
            validate_password(password)?;
            auth::hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?
        }
        None => existing.password_hash,
    };

    let update = NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username.trim().to_string(),
        password_hash,
        role,
    };

    state.db.users().update(id, &update).await?;

    let user = state
        .db
        .users()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {id}")))?;

    Ok(Json(ApiResponse::new("Record updated successfully", UserDto::from(user))))
}

/// DELETE /users/:id
///
/// Users who have created bills cannot be removed; the foreign key
/// surfaces as a 409.
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_admin(&auth)?;

    state.db.users().delete(id).await?;

    Ok(Json(ApiResponse::new("Record deleted successfully", ())))
}
