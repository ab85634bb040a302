//! Cleaning policy for ingested rows: column-median fill for price and
//! quantity, category-mean fill for rating.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use super::ProductRecord;

/// A fully cleaned row, ready for the catalog table.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanProduct {
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity_sold: i32,
    pub rating: Option<Decimal>,
    pub review_count: Option<i32>,
}

/// Median of the values present in a column. Even-length columns take
/// the arithmetic mean of the two middle values. Medians are less
/// sensitive to outliers than means, which matters for price columns.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    }
}

/// Mean rating per category, over the rows that have one. Categories
/// where no row carries a rating are absent from the map, which leaves
/// their rows missing after the fill pass.
pub fn category_rating_means(records: &[ProductRecord]) -> HashMap<String, Decimal> {
    let mut sums: HashMap<String, (Decimal, i64)> = HashMap::new();
    for record in records {
        if let Some(rating) = record.rating {
            let entry = sums
                .entry(record.category.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(category, (sum, count))| (category, sum / Decimal::from(count)))
        .collect()
}

/// Apply the full cleaning policy.
///
/// Rows that still have no price or quantity after imputation (only
/// possible when the entire column held no valid value) are dropped
/// with a warning rather than written as NULLs.
pub fn clean_records(records: Vec<ProductRecord>) -> Vec<CleanProduct> {
    let prices: Vec<Decimal> = records.iter().filter_map(|r| r.price).collect();
    let quantities: Vec<Decimal> = records
        .iter()
        .filter_map(|r| r.quantity_sold.map(Decimal::from))
        .collect();

    let price_median = median(&prices);
    let quantity_median = median(&quantities).and_then(|m| m.round().to_i32());
    let rating_means = category_rating_means(&records);

    let mut cleaned = Vec::with_capacity(records.len());
    for record in records {
        let price = record.price.or(price_median);
        let quantity_sold = record.quantity_sold.or(quantity_median);

        let (Some(price), Some(quantity_sold)) = (price, quantity_sold) else {
            warn!(
                product_id = record.product_id,
                "skipping row with no imputable price or quantity"
            );
            continue;
        };

        let rating = record
            .rating
            .or_else(|| rating_means.get(&record.category).copied());

        cleaned.push(CleanProduct {
            product_id: record.product_id,
            product_name: record.product_name,
            category: record.category,
            price,
            quantity_sold,
            rating,
            review_count: record.review_count,
        });
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        product_id: i32,
        category: &str,
        price: Option<&str>,
        quantity_sold: Option<i32>,
        rating: Option<&str>,
    ) -> ProductRecord {
        ProductRecord {
            product_id,
            product_name: format!("product-{product_id}"),
            category: category.to_string(),
            price: price.map(|p| p.parse().unwrap()),
            quantity_sold,
            rating: rating.map(|r| r.parse().unwrap()),
            review_count: None,
        }
    }

    #[test]
    fn median_of_odd_column() {
        let values = vec![Decimal::from(30), Decimal::from(10), Decimal::from(20)];
        assert_eq!(median(&values), Some(Decimal::from(20)));
    }

    #[test]
    fn median_of_even_column_averages_the_middle() {
        let values = vec![
            Decimal::from(10),
            Decimal::from(20),
            Decimal::from(30),
            Decimal::from(40),
        ];
        assert_eq!(median(&values), Some(Decimal::from(25)));
    }

    #[test]
    fn median_of_empty_column_is_missing() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn missing_price_fills_with_median_and_keeps_both_rows() {
        let records = vec![
            record(1, "A", Some("10"), Some(2), None),
            record(2, "A", None, Some(3), None),
        ];

        let cleaned = clean_records(records);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].price, Decimal::from(10));
        assert_eq!(cleaned[1].price, Decimal::from(10));
    }

    #[test]
    fn missing_quantity_fills_with_rounded_median() {
        let records = vec![
            record(1, "A", Some("10"), Some(2), None),
            record(2, "A", Some("12"), Some(5), None),
            record(3, "A", Some("14"), None, None),
        ];

        let cleaned = clean_records(records);
        // Median of [2, 5] is 3.5, rounded to 4.
        assert_eq!(cleaned[2].quantity_sold, 4);
    }

    #[test]
    fn missing_rating_fills_with_category_mean() {
        let records = vec![
            record(1, "A", Some("10"), Some(1), Some("4.0")),
            record(2, "A", Some("10"), Some(1), Some("5.0")),
            record(3, "A", Some("10"), Some(1), None),
            record(4, "B", Some("10"), Some(1), Some("3.0")),
        ];

        let cleaned = clean_records(records);
        assert_eq!(cleaned[2].rating, Some("4.5".parse().unwrap()));
        // The mean is conditional on the category, not global.
        assert_eq!(cleaned[3].rating, Some(Decimal::from(3)));
    }

    #[test]
    fn category_with_no_rated_rows_stays_missing() {
        let records = vec![
            record(1, "A", Some("10"), Some(1), Some("4.0")),
            record(2, "B", Some("10"), Some(1), None),
        ];

        let cleaned = clean_records(records);
        assert_eq!(cleaned[1].rating, None);
    }

    #[test]
    fn rows_with_nothing_to_impute_from_are_dropped() {
        let records = vec![
            record(1, "A", None, Some(1), None),
            record(2, "A", None, Some(2), None),
        ];

        // No row has a valid price, so the column median does not exist.
        let cleaned = clean_records(records);
        assert!(cleaned.is_empty());
    }
}
