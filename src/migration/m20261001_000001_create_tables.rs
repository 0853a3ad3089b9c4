use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stores::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stores::StoreName).string().not_null())
                    .col(ColumnDef::new(Stores::OwnerName).string().not_null())
                    .col(ColumnDef::new(Stores::Phone).string_len(16).not_null())
                    .col(ColumnDef::new(Stores::Email).string().not_null())
                    .col(ColumnDef::new(Stores::LicenseNumber).string().not_null())
                    .col(ColumnDef::new(Stores::City).string().not_null())
                    .col(ColumnDef::new(Stores::Area).string().not_null())
                    .col(ColumnDef::new(Stores::Pincode).string_len(16).not_null())
                    .col(ColumnDef::new(Stores::Address).text().not_null())
                    .col(ColumnDef::new(Stores::ImageRef).string().null())
                    .col(ColumnDef::new(Stores::LicenseFileRef).string().null())
                    .col(ColumnDef::new(Stores::SearchKey).text().not_null())
                    .col(ColumnDef::new(Stores::State).string_len(32).not_null())
                    .col(ColumnDef::new(Stores::RejectionReason).text().null())
                    .col(ColumnDef::new(Stores::ApprovedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Stores::RemovedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Stores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StoreActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoreActivity::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoreActivity::StoreId).uuid().not_null())
                    .col(ColumnDef::new(StoreActivity::FromState).string_len(32).null())
                    .col(ColumnDef::new(StoreActivity::ToState).string_len(32).not_null())
                    .col(ColumnDef::new(StoreActivity::ActorId).uuid().null())
                    .col(ColumnDef::new(StoreActivity::Reason).text().null())
                    .col(
                        ColumnDef::new(StoreActivity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_store_activity_store")
                            .from(StoreActivity::Table, StoreActivity::StoreId)
                            .to(Stores::Table, Stores::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderSequences::Day)
                            .string_len(8)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderSequences::LastValue).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Orders::OrderNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::StoreId).uuid().not_null())
                    .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string_len(16).not_null())
                    .col(ColumnDef::new(Orders::DeliveryAddress).text().not_null())
                    .col(ColumnDef::new(Orders::PaymentMethod).string_len(32).not_null())
                    .col(ColumnDef::new(Orders::TotalAmount).big_integer().not_null())
                    .col(ColumnDef::new(Orders::SearchKey).text().not_null())
                    .col(ColumnDef::new(Orders::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_store")
                            .from(Orders::Table, Orders::StoreId)
                            .to(Stores::Table, Stores::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::Position).integer().not_null())
                    .col(ColumnDef::new(OrderItems::MedicineName).string().not_null())
                    .col(ColumnDef::new(OrderItems::UnitPrice).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(OrderItems::PackSize).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderSequences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StoreActivity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Stores {
    Table,
    Id,
    StoreName,
    OwnerName,
    Phone,
    Email,
    LicenseNumber,
    City,
    Area,
    Pincode,
    Address,
    ImageRef,
    LicenseFileRef,
    SearchKey,
    State,
    RejectionReason,
    ApprovedAt,
    RemovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum StoreActivity {
    Table,
    Id,
    StoreId,
    FromState,
    ToState,
    ActorId,
    Reason,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum OrderSequences {
    Table,
    Day,
    LastValue,
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    OrderNumber,
    StoreId,
    CustomerName,
    CustomerPhone,
    DeliveryAddress,
    PaymentMethod,
    TotalAmount,
    SearchKey,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum OrderItems {
    Table,
    Id,
    OrderId,
    Position,
    MedicineName,
    UnitPrice,
    Quantity,
    PackSize,
}
