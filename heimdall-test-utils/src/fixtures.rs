//! Fixture factories inserting entity rows for tests.

pub mod factory {
    use chrono::{Duration, NaiveDate, Utc};
    use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

    use entity::license::LicenseState;

    pub async fn insert_worker(
        db: &DatabaseConnection,
        first_name: &str,
        last_name: &str,
    ) -> Result<entity::worker::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::worker::ActiveModel {
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
            email: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            position: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_license_type(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<entity::license_type::Model, DbErr> {
        entity::license_type::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_license(
        db: &DatabaseConnection,
        worker_id: i32,
        license_type_id: i32,
        expiry_date: NaiveDate,
        state: LicenseState,
    ) -> Result<entity::license::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::license::ActiveModel {
            worker_id: ActiveValue::Set(worker_id),
            license_type_id: ActiveValue::Set(license_type_id),
            code: ActiveValue::Set(None),
            issue_date: ActiveValue::Set(expiry_date - Duration::days(365)),
            expiry_date: ActiveValue::Set(expiry_date),
            state: ActiveValue::Set(state),
            notes: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_required_license_type(
        db: &DatabaseConnection,
        worker_id: i32,
        license_type_id: i32,
    ) -> Result<entity::worker_required_license_type::Model, DbErr> {
        entity::worker_required_license_type::ActiveModel {
            worker_id: ActiveValue::Set(worker_id),
            license_type_id: ActiveValue::Set(license_type_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Settings row shape for tests; defaults mirror the application's lazy
    /// default row with both channels off and every threshold on.
    pub struct AlertSettingsFixture {
        pub email_enabled: bool,
        pub sms_enabled: bool,
        pub warning_90_days: bool,
        pub warning_60_days: bool,
        pub warning_30_days: bool,
        pub recipient_email: Option<String>,
        pub recipient_phone: Option<String>,
    }

    impl Default for AlertSettingsFixture {
        fn default() -> Self {
            Self {
                email_enabled: false,
                sms_enabled: false,
                warning_90_days: true,
                warning_60_days: true,
                warning_30_days: true,
                recipient_email: None,
                recipient_phone: None,
            }
        }
    }

    pub async fn insert_alert_settings(
        db: &DatabaseConnection,
        fixture: AlertSettingsFixture,
    ) -> Result<entity::alert_setting::Model, DbErr> {
        entity::alert_setting::ActiveModel {
            email_enabled: ActiveValue::Set(fixture.email_enabled),
            sms_enabled: ActiveValue::Set(fixture.sms_enabled),
            warning_90_days: ActiveValue::Set(fixture.warning_90_days),
            warning_60_days: ActiveValue::Set(fixture.warning_60_days),
            warning_30_days: ActiveValue::Set(fixture.warning_30_days),
            recipient_email: ActiveValue::Set(fixture.recipient_email),
            recipient_phone: ActiveValue::Set(fixture.recipient_phone),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
