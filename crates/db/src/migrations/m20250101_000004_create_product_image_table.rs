//! Create product image table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductImage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductImage::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductImage::ProductId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductImage::Image).string_len(1024).null())
                    .col(
                        ColumnDef::new(ProductImage::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_image_product")
                            .from(ProductImage::Table, ProductImage::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: product_id (for listing a product's images)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_image_product_id")
                    .table(ProductImage::Table)
                    .col(ProductImage::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductImage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProductImage {
    Table,
    Id,
    ProductId,
    Image,
    CreatedAt,
}

#[derive(Iden)]
enum Product {
    Table,
    Id,
}
