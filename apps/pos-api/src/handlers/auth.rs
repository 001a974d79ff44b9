//! Authentication handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::AppState;
use tillpoint_billing::UserDto;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

/// POST /auth/login - exchange credentials for a bearer token.
///
/// Unknown username and wrong password produce the identical response, so
/// the endpoint does not leak which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .db
        .users()
        .get_by_username(req.username.trim())
        .await?
        .ok_or_else(|| {
            warn!(username = %req.username, "Login attempt for unknown username");
            invalid()
        })?;

    if !auth::verify_password(&req.password, &user.password_hash) {
        warn!(username = %user.username, "Login attempt with wrong password");
        return Err(invalid());
    }

    let token = auth::create_token(&user, &state.config.jwt_secret, state.config.jwt_lifetime_secs)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(user_id = user.id, username = %user.username, "Login successful");

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_lifetime_secs,
        user: UserDto::from(user),
    };

    Ok(Json(ApiResponse::new("Login successful", response)))
}
