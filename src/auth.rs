//! Bearer-token authentication.
//!
//! Issues HS256 tokens on login and validates them in front of the
//! protected report route. Tokens are stateless: validity is the
//! signature plus the expiry claim, nothing else.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::schemas::{AppState, ErrorResponse};

/// Signing configuration for bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: String,
    ttl_secs: i64,
    algorithm: Algorithm,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            algorithm: Algorithm::HS256,
        }
    }
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued to.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
}

impl Claims {
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// Authentication failure surfaced by the middleware.
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingToken,
    /// Invalid token format
    InvalidTokenFormat,
    /// Token validation failed
    ValidationFailed(String),
    /// Token expired
    TokenExpired,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthError::MissingToken => (
                "MISSING_TOKEN",
                "Authorization header is required".to_string(),
            ),
            AuthError::InvalidTokenFormat => (
                "INVALID_TOKEN_FORMAT",
                "Invalid authorization header format. Expected: Bearer <token>".to_string(),
            ),
            AuthError::ValidationFailed(msg) => ("TOKEN_VALIDATION_FAILED", msg),
            AuthError::TokenExpired => ("TOKEN_EXPIRED", "Token has expired".to_string()),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            success: false,
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Issue a signed token asserting `username`.
pub fn issue_token(
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        exp: (now + Duration::seconds(config.ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Extract the raw token from a bearer authorization header.
pub fn extract_token(auth_header: &str) -> Result<&str, AuthError> {
    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidTokenFormat);
    }
    Ok(&auth_header[7..])
}

/// Validate a token and return its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let validation = Validation::new(config.algorithm);
    let key = DecodingKey::from_secret(config.secret.as_bytes());

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
            AuthError::TokenExpired
        } else {
            AuthError::ValidationFailed(e.to_string())
        }
    })?;

    Ok(token_data.claims)
}

/// Require-authentication middleware for the protected routes.
///
/// Validates the bearer token and stores the claims in request
/// extensions for the downstream handler. Rejected requests never reach
/// the handler, so an unauthenticated report request never touches the
/// catalog.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_token(auth_header)?;
    let claims = validate_token(token, &state.jwt)?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
