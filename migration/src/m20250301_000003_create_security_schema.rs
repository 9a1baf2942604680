use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create security_alerts table
        manager
            .create_table(
                Table::create()
                    .table(SecurityAlerts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecurityAlerts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SecurityAlerts::DeviceId).integer().null())
                    .col(
                        ColumnDef::new(SecurityAlerts::AlertType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SecurityAlerts::Severity).string().not_null())
                    .col(
                        ColumnDef::new(SecurityAlerts::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SecurityAlerts::SourceIp).string().null())
                    .col(
                        ColumnDef::new(SecurityAlerts::DetectedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SecurityAlerts::ResolvedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(SecurityAlerts::Status).string().not_null())
                    .col(ColumnDef::new(SecurityAlerts::ResolvedBy).string().null())
                    .col(ColumnDef::new(SecurityAlerts::Metadata).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Indexes for the dashboard's filter/summary queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_security_alerts_status")
                    .table(SecurityAlerts::Table)
                    .col(SecurityAlerts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_security_alerts_severity")
                    .table(SecurityAlerts::Table)
                    .col(SecurityAlerts::Severity)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_security_alerts_device_id")
                    .table(SecurityAlerts::Table)
                    .col(SecurityAlerts::DeviceId)
                    .to_owned(),
            )
            .await?;

        // Create blocked_attempts table
        manager
            .create_table(
                Table::create()
                    .table(BlockedAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlockedAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlockedAttempts::SourceIp).string().null())
                    .col(
                        ColumnDef::new(BlockedAttempts::TargetDeviceId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BlockedAttempts::AttemptType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlockedAttempts::BlockedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlockedAttempts::AttemptCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlockedAttempts::UserAgent).string().null())
                    .col(
                        ColumnDef::new(BlockedAttempts::RequestDetails)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on blocked_at for time-range queries
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blocked_attempts_blocked_at")
                    .table(BlockedAttempts::Table)
                    .col(BlockedAttempts::BlockedAt)
                    .to_owned(),
            )
            .await?;

        // Index on attempt_type for filtering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_blocked_attempts_attempt_type")
                    .table(BlockedAttempts::Table)
                    .col(BlockedAttempts::AttemptType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlockedAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SecurityAlerts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SecurityAlerts {
    Table,
    Id,
    DeviceId,
    AlertType,
    Severity,
    Description,
    SourceIp,
    DetectedAt,
    ResolvedAt,
    Status,
    ResolvedBy,
    Metadata,
}

#[derive(DeriveIden)]
enum BlockedAttempts {
    Table,
    Id,
    SourceIp,
    TargetDeviceId,
    AttemptType,
    BlockedAt,
    AttemptCount,
    UserAgent,
    RequestDetails,
}
