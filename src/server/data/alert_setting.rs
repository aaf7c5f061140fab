use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
};

use crate::model::setting::UpdateAlertSettingDto;

pub struct AlertSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AlertSettingRepository<'a> {
    /// Creates a new instance of [`AlertSettingRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the singleton alert settings row, if one exists
    pub async fn get(&self) -> Result<Option<entity::alert_setting::Model>, DbErr> {
        entity::prelude::AlertSetting::find().one(self.db).await
    }

    /// Creates the default settings row: both channels off, every warning
    /// threshold on, no recipients
    pub async fn create_default(&self) -> Result<entity::alert_setting::Model, DbErr> {
        let settings = entity::alert_setting::ActiveModel {
            email_enabled: ActiveValue::Set(false),
            sms_enabled: ActiveValue::Set(false),
            warning_90_days: ActiveValue::Set(true),
            warning_60_days: ActiveValue::Set(true),
            warning_30_days: ActiveValue::Set(true),
            recipient_email: ActiveValue::Set(None),
            recipient_phone: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        settings.insert(self.db).await
    }

    /// Overwrites the settings row with the given values
    pub async fn update(
        &self,
        settings: entity::alert_setting::Model,
        data: &UpdateAlertSettingDto,
    ) -> Result<entity::alert_setting::Model, DbErr> {
        let mut settings_am = settings.into_active_model();
        settings_am.email_enabled = ActiveValue::Set(data.email_enabled);
        settings_am.sms_enabled = ActiveValue::Set(data.sms_enabled);
        settings_am.warning_90_days = ActiveValue::Set(data.warning_90_days);
        settings_am.warning_60_days = ActiveValue::Set(data.warning_60_days);
        settings_am.warning_30_days = ActiveValue::Set(data.warning_30_days);
        settings_am.recipient_email = ActiveValue::Set(data.recipient_email.clone());
        settings_am.recipient_phone = ActiveValue::Set(data.recipient_phone.clone());
        settings_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        settings_am.update(self.db).await
    }
}
