//! One-shot catalog ingestion: read the CSV source, coerce and impute
//! numeric columns, then upsert every row into the products table by
//! primary key.

pub mod clean;

use std::path::Path;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use model::entities::product;

use crate::error::{ComputeError, Result};
use clean::CleanProduct;

/// One row of the source file before any cleaning. Numeric columns
/// arrive as raw text so junk values coerce to a missing marker instead
/// of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    product_id: String,
    product_name: String,
    category: String,
    price: String,
    quantity_sold: String,
    rating: String,
    review_count: String,
}

/// A parsed row with numeric columns coerced. `None` marks values that
/// were absent or not numeric in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub price: Option<Decimal>,
    pub quantity_sold: Option<i32>,
    pub rating: Option<Decimal>,
    pub review_count: Option<i32>,
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

// Integer columns may carry a decimal point in sources that round-trip
// through spreadsheet tools ("20.0"); those still count as numeric.
fn parse_int(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = raw.parse::<i32>() {
        return Some(value);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.round() as i32)
}

fn coerce(raw: RawRecord) -> Option<ProductRecord> {
    let product_id = match raw.product_id.trim().parse::<i32>() {
        Ok(id) => id,
        Err(_) => {
            warn!(
                product_id = %raw.product_id,
                "skipping row without a numeric product_id"
            );
            return None;
        }
    };

    Some(ProductRecord {
        product_id,
        product_name: raw.product_name,
        category: raw.category,
        price: parse_decimal(&raw.price),
        quantity_sold: parse_int(&raw.quantity_sold),
        rating: parse_decimal(&raw.rating),
        review_count: parse_int(&raw.review_count),
    })
}

/// Read the source file into coerced records.
///
/// A missing path and a zero-byte file are distinct reported
/// conditions; a file that parses but holds junk numerics still reads
/// fully, with the junk coerced to missing.
pub fn read_source(path: &Path) -> Result<Vec<ProductRecord>> {
    if !path.exists() {
        return Err(ComputeError::SourceNotFound(path.to_path_buf()));
    }

    let metadata =
        std::fs::metadata(path).map_err(|e| ComputeError::Parse(format!("io error: {e}")))?;
    if metadata.len() == 0 {
        return Err(ComputeError::EmptySource);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        let raw = row?;
        if let Some(record) = coerce(raw) {
            records.push(record);
        }
    }

    Ok(records)
}

/// Upsert every cleaned row into the products table by primary key,
/// inside one transaction. A failure rolls the whole batch back.
#[instrument(skip_all, fields(rows = rows.len()))]
pub async fn upsert_products(db: &DatabaseConnection, rows: Vec<CleanProduct>) -> Result<u64> {
    let count = rows.len() as u64;

    db.transaction::<_, (), DbErr>(|txn| {
        Box::pin(async move {
            for row in rows {
                let existing = product::Entity::find_by_id(row.product_id).one(txn).await?;
                let active = product::ActiveModel {
                    product_id: Set(row.product_id),
                    product_name: Set(row.product_name),
                    category: Set(row.category),
                    price: Set(row.price),
                    quantity_sold: Set(row.quantity_sold),
                    rating: Set(row.rating),
                    review_count: Set(row.review_count),
                };
                if existing.is_some() {
                    active.update(txn).await?;
                } else {
                    active.insert(txn).await?;
                }
            }
            Ok(())
        })
    })
    .await?;

    Ok(count)
}

/// Run the full ingestion job: read, clean, upsert.
/// Returns the number of rows written to the catalog.
#[instrument(skip(db))]
pub async fn run(db: &DatabaseConnection, path: &Path) -> Result<u64> {
    info!(path = %path.display(), "starting catalog ingestion");

    let records = read_source(path)?;
    debug!(rows = records.len(), "parsed source rows");

    let cleaned = clean::clean_records(records);
    let count = upsert_products(db, cleaned).await?;

    info!(rows = count, "catalog ingestion finished");
    Ok(count)
}
