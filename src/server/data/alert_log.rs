use chrono::NaiveDateTime;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use entity::alert_log::{AlertChannel, AlertLevel};

pub struct AlertLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AlertLogRepository<'a> {
    /// Creates a new instance of [`AlertLogRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a log row for one notification attempt.
    ///
    /// Rows are append-only; nothing ever updates them afterwards.
    pub async fn create(
        &self,
        license_id: i32,
        channel: AlertChannel,
        level: AlertLevel,
        success: bool,
        error: Option<String>,
        sent_at: NaiveDateTime,
    ) -> Result<entity::alert_log::Model, DbErr> {
        let log = entity::alert_log::ActiveModel {
            license_id: ActiveValue::Set(license_id),
            channel: ActiveValue::Set(channel),
            level: ActiveValue::Set(level),
            success: ActiveValue::Set(success),
            error: ActiveValue::Set(error),
            sent_at: ActiveValue::Set(sent_at),
            ..Default::default()
        };

        log.insert(self.db).await
    }

    /// Reports whether a successful alert was already sent for the given
    /// license and level since the given instant, on any channel
    pub async fn has_recent_success(
        &self,
        license_id: i32,
        level: AlertLevel,
        since: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::AlertLog::find()
            .filter(entity::alert_log::Column::LicenseId.eq(license_id))
            .filter(entity::alert_log::Column::Level.eq(level.to_value()))
            .filter(entity::alert_log::Column::Success.eq(true))
            .filter(entity::alert_log::Column::SentAt.gte(since))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets the most recent log rows with their licenses attached, newest first
    pub async fn get_recent(
        &self,
        limit: u64,
    ) -> Result<Vec<(entity::alert_log::Model, Option<entity::license::Model>)>, DbErr> {
        entity::prelude::AlertLog::find()
            .find_also_related(entity::prelude::License)
            .order_by_desc(entity::alert_log::Column::SentAt)
            .limit(limit)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

    use entity::alert_log::{AlertChannel, AlertLevel};
    use entity::license::LicenseState;

    use super::AlertLogRepository;
    use crate::model::license::CreateLicenseDto;
    use crate::server::data::license::LicenseRepository;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);

        for stmt in [
            schema.create_table_from_entity(entity::prelude::Worker),
            schema.create_table_from_entity(entity::prelude::LicenseType),
            schema.create_table_from_entity(entity::prelude::License),
            schema.create_table_from_entity(entity::prelude::AlertLog),
        ] {
            db.execute(&stmt).await?;
        }

        let worker_repository = crate::server::data::worker::WorkerRepository::new(&db);
        worker_repository
            .create(&crate::model::worker::CreateWorkerDto {
                first_name: "Dana".to_string(),
                last_name: "Ironside".to_string(),
                email: None,
                phone: None,
                position: None,
                notes: None,
            })
            .await?;

        let license_type_repository =
            crate::server::data::license_type::LicenseTypeRepository::new(&db);
        license_type_repository
            .create("Working at Heights", None)
            .await?;

        let license_repository = LicenseRepository::new(&db);
        license_repository
            .insert_with_state(
                &CreateLicenseDto {
                    worker_id: 1,
                    license_type_id: 1,
                    code: None,
                    issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    notes: None,
                },
                LicenseState::Active,
                false,
            )
            .await?;

        Ok(db)
    }

    /// Expect only successful rows at the same level inside the window to count
    #[tokio::test]
    async fn test_has_recent_success_filters() -> Result<(), DbErr> {
        let db = setup().await?;
        let alert_log_repository = AlertLogRepository::new(&db);

        let now = Utc::now().naive_utc();
        let since = now - Duration::days(7);

        // Failed attempt inside the window does not suppress
        alert_log_repository
            .create(
                1,
                AlertChannel::Email,
                AlertLevel::Days30,
                false,
                Some("connection refused".to_string()),
                now - Duration::days(1),
            )
            .await?;
        assert!(
            !alert_log_repository
                .has_recent_success(1, AlertLevel::Days30, since)
                .await?
        );

        // Success at a different level does not suppress
        alert_log_repository
            .create(1, AlertChannel::Email, AlertLevel::Days60, true, None, now)
            .await?;
        assert!(
            !alert_log_repository
                .has_recent_success(1, AlertLevel::Days30, since)
                .await?
        );

        // Success outside the window does not suppress
        alert_log_repository
            .create(
                1,
                AlertChannel::Email,
                AlertLevel::Days30,
                true,
                None,
                now - Duration::days(8),
            )
            .await?;
        assert!(
            !alert_log_repository
                .has_recent_success(1, AlertLevel::Days30, since)
                .await?
        );

        // Success at the same level inside the window suppresses
        alert_log_repository
            .create(1, AlertChannel::Sms, AlertLevel::Days30, true, None, now)
            .await?;
        assert!(
            alert_log_repository
                .has_recent_success(1, AlertLevel::Days30, since)
                .await?
        );

        Ok(())
    }
}
