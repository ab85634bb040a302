use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, Set};
use tracing::{debug, info, instrument, trace, warn};

use model::entities::user;

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::schemas::{AppState, CredentialsRequest, ErrorResponse, MessageResponse, TokenResponse};

/// Register a new user.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing or empty fields", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    trace!("Entering signup function");
    let (username, password) = request.require()?;
    debug!("Registering user: {}", username);

    // Slow salted hash; the salt is embedded per record in the output.
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let new_user = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
    };

    match new_user.insert(&state.db).await {
        Ok(created) => {
            info!("User registered successfully: {}", created.username);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    msg: "User registered successfully".to_string(),
                }),
            ))
        }
        Err(db_error) => {
            warn!("Failed to register user '{}': {}", username, db_error);
            Err(map_unique_violation(db_error, username))
        }
    }
}

/// Concurrent sign-ups racing on one username are resolved by the
/// store's uniqueness constraint; the loser surfaces as a conflict.
fn map_unique_violation(db_error: DbErr, username: &str) -> ApiError {
    let message = db_error.to_string().to_lowercase();
    if message.contains("unique") || message.contains("constraint") {
        ApiError::Conflict(format!("Username '{}' already exists", username))
    } else {
        ApiError::Store(db_error)
    }
}

/// Log in and receive a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing or empty fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    trace!("Entering login function");
    let (username, password) = request.require()?;
    debug!("Login attempt for user: {}", username);

    let user_row = user::Entity::find_by_id(username.to_string())
        .one(&state.db)
        .await?;

    // Unknown users and wrong passwords take the same exit so the
    // response cannot be used for username enumeration.
    let Some(user_row) = user_row else {
        warn!("Login failed for user: {}", username);
        return Err(ApiError::InvalidCredentials);
    };

    if !bcrypt::verify(password, &user_row.password_hash)? {
        warn!("Login failed for user: {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = issue_token(&user_row.username, &state.jwt)?;
    info!("Login succeeded for user: {}", user_row.username);

    Ok(Json(TokenResponse { access_token }))
}
