#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;

    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::auth::JwtConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;

    pub const TEST_JWT_SECRET: &str = "unit-test-signing-secret-do-not-deploy";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        AppState {
            db,
            jwt: Arc::new(JwtConfig::new(TEST_JWT_SECRET, 3600)),
        }
    }

    /// Insert a product row directly into the catalog.
    pub async fn seed_product(
        db: &DatabaseConnection,
        product_id: i32,
        product_name: &str,
        category: &str,
        price_cents: i64,
        quantity_sold: i32,
    ) {
        model::entities::product::ActiveModel {
            product_id: Set(product_id),
            product_name: Set(product_name.to_string()),
            category: Set(category.to_string()),
            price: Set(Decimal::new(price_cents, 2)),
            quantity_sold: Set(quantity_sold),
            rating: Set(None),
            review_count: Set(None),
        }
        .insert(db)
        .await
        .expect("Failed to seed product");
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment
    /// variable, defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }
}
