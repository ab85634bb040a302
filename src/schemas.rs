use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{Modify, OpenApi, ToSchema};
use validator::Validate;

use crate::auth::JwtConfig;
use crate::error::ApiError;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Token-signing configuration
    pub jwt: Arc<JwtConfig>,
}

/// Request body for sign-up and login. Both fields are required and
/// must be non-empty.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Check presence and non-emptiness at the facade boundary,
    /// yielding the field values for the service call.
    pub fn require(&self) -> Result<(&str, &str), ApiError> {
        self.validate()
            .map_err(|_| ApiError::Validation("Username and password required".to_string()))?;

        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::Validation(
                "Username and password required".to_string(),
            )),
        }
    }
}

/// Response for a successful sign-up.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Registers the bearer scheme the report route requires.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::report::generate_report,
    ),
    components(
        schemas(
            CredentialsRequest,
            MessageResponse,
            TokenResponse,
            ErrorResponse,
            HealthResponse,
            common::ReportRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sign-up and login endpoints"),
        (name = "report", description = "Sales summary download"),
    ),
    info(
        title = "Shoprust API",
        description = "Product catalog service - CSV ingestion, token auth and sales summary reports",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fail_the_boundary_check() {
        let request = CredentialsRequest {
            username: Some("alice".to_string()),
            password: None,
        };
        assert!(request.require().is_err());
    }

    #[test]
    fn empty_fields_fail_the_boundary_check() {
        let request = CredentialsRequest {
            username: Some("alice".to_string()),
            password: Some(String::new()),
        };
        assert!(request.require().is_err());
    }

    #[test]
    fn present_fields_pass_through() {
        let request = CredentialsRequest {
            username: Some("alice".to_string()),
            password: Some("hunter2".to_string()),
        };
        assert_eq!(request.require().unwrap(), ("alice", "hunter2"));
    }
}
