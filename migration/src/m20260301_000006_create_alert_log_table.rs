use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000003_create_license_table::License;

static FK_ALERT_LOG_LICENSE_ID: &str = "fk_alert_log_license_id";
static IDX_ALERT_LOG_LICENSE_LEVEL_SENT: &str = "idx_alert_log_license_level_sent";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlertLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AlertLog::Id))
                    .col(integer(AlertLog::LicenseId))
                    .col(string_len(AlertLog::Channel, 8))
                    .col(string_len(AlertLog::Level, 8))
                    .col(boolean(AlertLog::Success))
                    .col(string_null(AlertLog::Error))
                    .col(timestamp(AlertLog::SentAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ALERT_LOG_LICENSE_ID)
                    .from_tbl(AlertLog::Table)
                    .from_col(AlertLog::LicenseId)
                    .to_tbl(License::Table)
                    .to_col(License::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Covers the duplicate-suppression lookup the expiry sweep runs per
        // license and level.
        manager
            .create_index(
                Index::create()
                    .name(IDX_ALERT_LOG_LICENSE_LEVEL_SENT)
                    .table(AlertLog::Table)
                    .col(AlertLog::LicenseId)
                    .col(AlertLog::Level)
                    .col(AlertLog::SentAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALERT_LOG_LICENSE_LEVEL_SENT)
                    .table(AlertLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ALERT_LOG_LICENSE_ID)
                    .table(AlertLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AlertLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AlertLog {
    Table,
    Id,
    LicenseId,
    Channel,
    Level,
    Success,
    Error,
    SentAt,
}
