use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Worker::Table)
                    .if_not_exists()
                    .col(pk_auto(Worker::Id))
                    .col(string(Worker::FirstName))
                    .col(string(Worker::LastName))
                    .col(string_null(Worker::Email))
                    .col(string_null(Worker::Phone))
                    .col(string_null(Worker::Position))
                    .col(string_null(Worker::Notes))
                    .col(timestamp(Worker::CreatedAt))
                    .col(timestamp(Worker::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Worker::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Worker {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Notes,
    CreatedAt,
    UpdatedAt,
}
