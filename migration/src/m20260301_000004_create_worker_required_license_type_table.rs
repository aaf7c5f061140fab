use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_worker_table::Worker;
use crate::m20260301_000002_create_license_type_table::LicenseType;

static FK_REQUIRED_WORKER_ID: &str = "fk_worker_required_license_type_worker_id";
static FK_REQUIRED_LICENSE_TYPE_ID: &str = "fk_worker_required_license_type_license_type_id";
static IDX_REQUIRED_WORKER_TYPE: &str = "idx_worker_required_license_type_worker_type";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkerRequiredLicenseType::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkerRequiredLicenseType::Id))
                    .col(integer(WorkerRequiredLicenseType::WorkerId))
                    .col(integer(WorkerRequiredLicenseType::LicenseTypeId))
                    .col(timestamp(WorkerRequiredLicenseType::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REQUIRED_WORKER_ID)
                    .from_tbl(WorkerRequiredLicenseType::Table)
                    .from_col(WorkerRequiredLicenseType::WorkerId)
                    .to_tbl(Worker::Table)
                    .to_col(Worker::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REQUIRED_LICENSE_TYPE_ID)
                    .from_tbl(WorkerRequiredLicenseType::Table)
                    .from_col(WorkerRequiredLicenseType::LicenseTypeId)
                    .to_tbl(LicenseType::Table)
                    .to_col(LicenseType::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REQUIRED_WORKER_TYPE)
                    .table(WorkerRequiredLicenseType::Table)
                    .col(WorkerRequiredLicenseType::WorkerId)
                    .col(WorkerRequiredLicenseType::LicenseTypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REQUIRED_WORKER_TYPE)
                    .table(WorkerRequiredLicenseType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REQUIRED_WORKER_ID)
                    .table(WorkerRequiredLicenseType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REQUIRED_LICENSE_TYPE_ID)
                    .table(WorkerRequiredLicenseType::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(WorkerRequiredLicenseType::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WorkerRequiredLicenseType {
    Table,
    Id,
    WorkerId,
    LicenseTypeId,
    CreatedAt,
}
