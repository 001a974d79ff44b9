//! JWT authentication and password hashing.
//!
//! Login exchanges a username/password for an HS256 bearer token carrying
//! the staff user's id and role. Every protected route reads the acting
//! user from that token - the bill creation body never names a user.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tillpoint_core::{User, UserRole};

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the staff user id.
    pub sub: i64,

    /// The user's role at issue time ("ADMIN" / "CASHIER").
    pub role: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// The authenticated caller, extracted from a validated token and stored
/// in request extensions by the auth middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: i64,
    pub role: UserRole,
}

impl AuthUser {
    /// True when the caller holds the ADMIN role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Auth errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Password hashing failed: {0}")]
    HashFailed(String),
}

/// Creates an access token for a staff user.
pub fn create_token(user: &User, secret: &str, lifetime_secs: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(lifetime_secs);

    let claims = Claims {
        sub: user.id,
        role: user.role.as_str().to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a token and returns its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Hashes a plaintext password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashFailed(e.to_string()))
}

/// Verifies a plaintext password against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
