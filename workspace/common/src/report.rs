use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable file name clients receive in the download disposition.
pub const REPORT_FILE_NAME: &str = "summary_report.csv";

/// Column order of the report artifact. Must match the field order of
/// [`ReportRow`] so serialized rows line up with the header.
pub const REPORT_COLUMNS: [&str; 4] = [
    "category",
    "total_revenue",
    "top_product",
    "top_product_quantity_sold",
];

/// One row of the per-category sales summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportRow {
    pub category: String,
    /// Sum of price x quantity_sold over all rows in the category.
    pub total_revenue: Decimal,
    /// Name of the product with the highest quantity_sold in the
    /// category. Ties keep the first row encountered in scan order.
    pub top_product: String,
    pub top_product_quantity_sold: i32,
}
