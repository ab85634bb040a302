use std::path::Path;

use anyhow::{Context, Result};
use sea_orm::Database;
use tracing::{debug, info, trace};

pub async fn run_ingestion(source: &str, database_url: &str) -> Result<()> {
    trace!("Entering run_ingestion function");
    info!("Starting catalog ingestion");
    debug!("Source file: {}", source);
    debug!("Database URL: {}", database_url);

    let db = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let rows = compute::ingest::run(&db, Path::new(source))
        .await
        .context("Catalog ingestion failed")?;

    info!("Catalog ingestion completed: {} rows upserted", rows);
    Ok(())
}
