use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string(Users::Username).primary_key())
                    .col(string(Users::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create products table. The primary key is not auto-generated;
        // product ids come from the ingestion source.
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(integer(Products::ProductId).primary_key())
                    .col(string(Products::ProductName))
                    .col(string(Products::Category))
                    .col(decimal_len(Products::Price, 16, 4))
                    .col(integer(Products::QuantitySold))
                    .col(decimal_len_null(Products::Rating, 4, 2))
                    .col(integer_null(Products::ReviewCount))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    ProductId,
    ProductName,
    Category,
    Price,
    QuantitySold,
    Rating,
    ReviewCount,
}
