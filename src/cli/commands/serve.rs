use std::path::Path;

use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use compute::ComputeError;

use crate::config::{AppConfig, initialize_app_state};
use crate::router::create_router;

pub async fn serve() -> Result<()> {
    trace!("Entering serve function");
    let config = AppConfig::from_env();
    info!("Shoprust application starting up");
    debug!("Database URL: {}", config.database_url);
    debug!("Bind address: {}", config.bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state(&config).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Ensure both tables exist before anything touches them.
    info!("Running database migrations");
    Migrator::up(&state.db, None).await?;

    // One-shot catalog ingestion. A failure aborts only this step; the
    // server still comes up and serves whatever the catalog holds.
    info!("Ingesting catalog source: {}", config.source_file);
    match compute::ingest::run(&state.db, Path::new(&config.source_file)).await {
        Ok(rows) => info!("Catalog ingestion finished: {} rows upserted", rows),
        Err(ComputeError::SourceNotFound(path)) => {
            warn!(
                "Catalog source {} does not exist, skipping ingestion",
                path.display()
            );
        }
        Err(ComputeError::EmptySource) => {
            warn!("Catalog source has no rows, skipping ingestion");
        }
        Err(e) => error!("Catalog ingestion failed: {}", e),
    }

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", config.bind_address);
    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", config.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", config.bind_address, e);
            return Err(e.into());
        }
    };

    info!("Shoprust API server running on http://{}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
