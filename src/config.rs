use std::sync::Arc;

use anyhow::Result;
use sea_orm::Database;

use crate::auth::JwtConfig;
use crate::schemas::AppState;

/// Runtime configuration, pulled from the environment (dotenv honored).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string.
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_address: String,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// Path of the CSV source ingested once at startup.
    pub source_file: String,
}

impl AppConfig {
    /// Load configuration from the environment with the defaults the
    /// service ships with.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://shoprust.db?mode=rwc".to_string()),
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "my-32-character-ultra-secure-and-ultra-long-secret".to_string()),
            token_ttl_secs: std::env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3600),
            source_file: std::env::var("SOURCE_FILE")
                .unwrap_or_else(|_| "products.csv".to_string()),
        }
    }
}

/// Initialize application state from configuration.
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    let jwt = JwtConfig::new(&config.jwt_secret, config.token_ttl_secs);

    Ok(AppState {
        db,
        jwt: Arc::new(jwt),
    })
}
