//! Migration: Create clients table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Clients::ClientNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Clients::FirstName).string().not_null())
                    .col(ColumnDef::new(Clients::MiddleName).string().null())
                    .col(ColumnDef::new(Clients::LastName).string().not_null())
                    .col(ColumnDef::new(Clients::Address).string().not_null())
                    .col(
                        ColumnDef::new(Clients::PhoneNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Clients::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Default listing order
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_created_at")
                    .table(Clients::Table)
                    .col(Clients::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_clients_created_at")
                    .table(Clients::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
    ClientNumber,
    FirstName,
    MiddleName,
    LastName,
    Address,
    PhoneNumber,
    Email,
    CreatedAt,
    UpdatedAt,
}
