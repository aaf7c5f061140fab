use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlertSetting::Table)
                    .if_not_exists()
                    .col(pk_auto(AlertSetting::Id))
                    .col(boolean(AlertSetting::EmailEnabled))
                    .col(boolean(AlertSetting::SmsEnabled))
                    .col(boolean(AlertSetting::Warning90Days))
                    .col(boolean(AlertSetting::Warning60Days))
                    .col(boolean(AlertSetting::Warning30Days))
                    .col(string_null(AlertSetting::RecipientEmail))
                    .col(string_null(AlertSetting::RecipientPhone))
                    .col(timestamp(AlertSetting::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlertSetting::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AlertSetting {
    Table,
    Id,
    EmailEnabled,
    SmsEnabled,
    Warning90Days,
    Warning60Days,
    Warning30Days,
    RecipientEmail,
    RecipientPhone,
    UpdatedAt,
}
