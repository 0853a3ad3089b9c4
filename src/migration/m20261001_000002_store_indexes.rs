use sea_orm_migration::{prelude::*, sea_orm::ConnectionTrait};

use super::m20261001_000001_create_tables::{Orders, StoreActivity, Stores};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Partial unique index: a license is free again once its store is removed.
// Postgres and SQLite both accept this form.
const LICENSE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_stores_license_active \
     ON stores (license_number) WHERE state <> 'removed'";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(LICENSE_INDEX)
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_stores_state")
                    .table(Stores::Table)
                    .col(Stores::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_store_created")
                    .table(Orders::Table)
                    .col(Orders::StoreId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_store_activity_store")
                    .table(StoreActivity::Table)
                    .col(StoreActivity::StoreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_store_activity_store",
            "idx_orders_store_created",
            "idx_stores_state",
            "idx_stores_license_active",
        ] {
            manager
                .drop_index(Index::drop().if_exists().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}
