//! Migration: Create client_product_categories join table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientProductCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientProductCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientProductCategories::ClientId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientProductCategories::ProductCategoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientProductCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_product_categories_client")
                            .from(
                                ClientProductCategories::Table,
                                ClientProductCategories::ClientId,
                            )
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_product_categories_category")
                            .from(
                                ClientProductCategories::Table,
                                ClientProductCategories::ProductCategoryId,
                            )
                            .to(ProductCategories::Table, ProductCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (client, category) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_client_product_categories_pair")
                    .table(ClientProductCategories::Table)
                    .col(ClientProductCategories::ClientId)
                    .col(ClientProductCategories::ProductCategoryId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_client_product_categories_pair")
                    .table(ClientProductCategories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(ClientProductCategories::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum ClientProductCategories {
    Table,
    Id,
    ClientId,
    ProductCategoryId,
    CreatedAt,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
}

#[derive(Iden)]
enum ProductCategories {
    Table,
    Id,
}
