//! API middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware.
///
/// Validates the bearer token and stores the acting [`AuthUser`] in
/// request extensions for handlers to extract.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or malformed Authorization header");
            return Err(ApiError::Unauthorized("Login required".to_string()));
        }
    };

    let claims = auth::validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let role = tillpoint_core::UserRole::parse(&claims.role)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role,
    });

    Ok(next.run(request).await)
}
