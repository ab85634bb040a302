use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// A product row in the catalog.
/// Rows are created or overwritten wholesale by the ingestion job and
/// never deleted; the id comes from the source file, not the store.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    pub product_name: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price: Decimal,
    pub quantity_sold: i32,
    /// Customer rating on a 0-5 scale. Stays NULL when the source had
    /// no rating and the category offered nothing to impute from.
    #[sea_orm(column_type = "Decimal(Some((4, 2)))", nullable)]
    pub rating: Option<Decimal>,
    pub review_count: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
