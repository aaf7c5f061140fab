use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_worker_table::Worker;
use crate::m20260301_000002_create_license_type_table::LicenseType;

static FK_LICENSE_WORKER_ID: &str = "fk_license_worker_id";
static FK_LICENSE_LICENSE_TYPE_ID: &str = "fk_license_license_type_id";
static IDX_LICENSE_WORKER_TYPE_STATE: &str = "idx_license_worker_type_state";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(License::Table)
                    .if_not_exists()
                    .col(pk_auto(License::Id))
                    .col(integer(License::WorkerId))
                    .col(integer(License::LicenseTypeId))
                    .col(string_null(License::Code))
                    .col(date(License::IssueDate))
                    .col(date(License::ExpiryDate))
                    .col(string_len(License::State, 16))
                    .col(string_null(License::Notes))
                    .col(timestamp(License::CreatedAt))
                    .col(timestamp(License::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LICENSE_WORKER_ID)
                    .from_tbl(License::Table)
                    .from_col(License::WorkerId)
                    .to_tbl(Worker::Table)
                    .to_col(Worker::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // License types must not disappear from under existing licenses.
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LICENSE_LICENSE_TYPE_ID)
                    .from_tbl(License::Table)
                    .from_col(License::LicenseTypeId)
                    .to_tbl(LicenseType::Table)
                    .to_col(LicenseType::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LICENSE_WORKER_TYPE_STATE)
                    .table(License::Table)
                    .col(License::WorkerId)
                    .col(License::LicenseTypeId)
                    .col(License::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LICENSE_WORKER_TYPE_STATE)
                    .table(License::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LICENSE_WORKER_ID)
                    .table(License::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LICENSE_LICENSE_TYPE_ID)
                    .table(License::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(License::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum License {
    Table,
    Id,
    WorkerId,
    LicenseTypeId,
    Code,
    IssueDate,
    ExpiryDate,
    State,
    Notes,
    CreatedAt,
    UpdatedAt,
}
