use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create devices table
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::Name).string().not_null())
                    .col(ColumnDef::new(Devices::DeviceType).string().not_null())
                    .col(
                        ColumnDef::new(Devices::MacAddress)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Devices::IpAddress).string().null())
                    .col(ColumnDef::new(Devices::Status).string().not_null())
                    .col(ColumnDef::new(Devices::Location).string().not_null())
                    .col(ColumnDef::new(Devices::FirmwareVersion).string().null())
                    .col(ColumnDef::new(Devices::LastSeen).big_integer().null())
                    .col(ColumnDef::new(Devices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Devices::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Index on status for dashboard filtering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_devices_status")
                    .table(Devices::Table)
                    .col(Devices::Status)
                    .to_owned(),
            )
            .await?;

        // Create device_logs table
        manager
            .create_table(
                Table::create()
                    .table(DeviceLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeviceLogs::DeviceId).integer().not_null())
                    .col(ColumnDef::new(DeviceLogs::UserId).string().null())
                    .col(ColumnDef::new(DeviceLogs::Action).string().not_null())
                    .col(ColumnDef::new(DeviceLogs::Details).string().not_null())
                    .col(
                        ColumnDef::new(DeviceLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on device_id for per-device history queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_device_logs_device_id")
                    .table(DeviceLogs::Table)
                    .col(DeviceLogs::DeviceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeviceLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    Name,
    DeviceType,
    MacAddress,
    IpAddress,
    Status,
    Location,
    FirmwareVersion,
    LastSeen,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DeviceLogs {
    Table,
    Id,
    DeviceId,
    UserId,
    Action,
    Details,
    CreatedAt,
}
