//! Create product table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::AuthorId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Product::CategorySlug)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Product::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Product::Description).text().not_null())
                    .col(
                        ColumnDef::new(Product::Price)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Product::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_author")
                            .from(Product::Table, Product::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategorySlug)
                            .to(Category::Table, Category::Slug)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: author_id (for "own" listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_author_id")
                    .table(Product::Table)
                    .col(Product::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Index: category_slug (for category browsing)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_slug")
                    .table(Product::Table)
                    .col(Product::CategorySlug)
                    .to_owned(),
            )
            .await?;

        // Index: created_at (for pagination)
        manager
            .create_index(
                Index::create()
                    .name("idx_product_created_at")
                    .table(Product::Table)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Product {
    Table,
    Id,
    AuthorId,
    CategorySlug,
    Title,
    Description,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    Table,
    Slug,
}
