//! Per-category sales summary over a full catalog scan.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{debug, instrument};

use common::{REPORT_COLUMNS, ReportRow};
use model::entities::product;

use crate::error::{ComputeError, Result};

/// Per-category accumulator for the single-pass scan.
struct CategoryAccumulator {
    total_revenue: Decimal,
    top_product: String,
    top_quantity: i32,
}

/// Compute the per-category sales summary from a full catalog scan.
///
/// Rows are scanned in `product_id` order. Within a category the top
/// product is the first row to reach the maximum `quantity_sold`; a
/// later tie does not displace it. Output is sorted by category. An
/// empty catalog yields an empty summary, not an error.
#[instrument(skip(db))]
pub async fn summarize(db: &DatabaseConnection) -> Result<Vec<ReportRow>> {
    let products = product::Entity::find()
        .order_by_asc(product::Column::ProductId)
        .all(db)
        .await?;
    debug!(rows = products.len(), "scanned catalog for summary");

    let mut groups: BTreeMap<String, CategoryAccumulator> = BTreeMap::new();
    for product in products {
        let revenue = product.price * Decimal::from(product.quantity_sold);
        match groups.get_mut(&product.category) {
            Some(accumulator) => {
                accumulator.total_revenue += revenue;
                if product.quantity_sold > accumulator.top_quantity {
                    accumulator.top_quantity = product.quantity_sold;
                    accumulator.top_product = product.product_name;
                }
            }
            None => {
                groups.insert(
                    product.category,
                    CategoryAccumulator {
                        total_revenue: revenue,
                        top_product: product.product_name,
                        top_quantity: product.quantity_sold,
                    },
                );
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(category, accumulator)| ReportRow {
            category,
            total_revenue: accumulator.total_revenue,
            top_product: accumulator.top_product,
            top_product_quantity_sold: accumulator.top_quantity,
        })
        .collect())
}

/// Serialize summary rows into the downloadable CSV artifact. The
/// header row is always present, even for an empty summary.
pub fn write_csv(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ComputeError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn seed(
        db: &DatabaseConnection,
        product_id: i32,
        name: &str,
        category: &str,
        price: Decimal,
        quantity_sold: i32,
    ) {
        product::ActiveModel {
            product_id: Set(product_id),
            product_name: Set(name.to_string()),
            category: Set(category.to_string()),
            price: Set(price),
            quantity_sold: Set(quantity_sold),
            rating: Set(None),
            review_count: Set(None),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn summary_aggregates_revenue_and_top_product() {
        let db = setup_db().await;
        seed(&db, 1, "Laptop", "Electronics", Decimal::from(1000), 10).await;
        seed(&db, 2, "Smartphone", "Electronics", Decimal::from(500), 20).await;
        seed(&db, 3, "Headphones", "Accessories", Decimal::from(50), 30).await;

        let rows = summarize(&db).await.unwrap();
        assert_eq!(rows.len(), 2);

        // Output is sorted by category.
        assert_eq!(rows[0].category, "Accessories");
        assert_eq!(rows[0].total_revenue, Decimal::from(1500));
        assert_eq!(rows[0].top_product, "Headphones");
        assert_eq!(rows[0].top_product_quantity_sold, 30);

        assert_eq!(rows[1].category, "Electronics");
        // 1000 x 10 + 500 x 20
        assert_eq!(rows[1].total_revenue, Decimal::from(20000));
        assert_eq!(rows[1].top_product, "Smartphone");
        assert_eq!(rows[1].top_product_quantity_sold, 20);
    }

    #[tokio::test]
    async fn quantity_ties_keep_the_first_scanned_row() {
        let db = setup_db().await;
        seed(&db, 1, "Monitor", "Electronics", Decimal::from(200), 15).await;
        seed(&db, 2, "Webcam", "Electronics", Decimal::from(80), 15).await;

        let rows = summarize(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].top_product, "Monitor");
        assert_eq!(rows[0].top_product_quantity_sold, 15);
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_summary() {
        let db = setup_db().await;

        let rows = summarize(&db).await.unwrap();
        assert!(rows.is_empty());

        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "category,total_revenue,top_product,top_product_quantity_sold\n"
        );
    }

    #[tokio::test]
    async fn csv_round_trips_through_the_shared_row_type() {
        let db = setup_db().await;
        seed(&db, 1, "Laptop", "Electronics", Decimal::from(1000), 10).await;

        let rows = summarize(&db).await.unwrap();
        let bytes = write_csv(&rows).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let parsed: Vec<ReportRow> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(parsed, rows);
    }
}
