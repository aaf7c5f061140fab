use sea_orm::DatabaseConnection;

use crate::{
    model::setting::UpdateAlertSettingDto,
    server::{data::alert_setting::AlertSettingRepository, error::Error},
};

pub struct SettingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingService<'a> {
    /// Creates a new instance of [`SettingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the alert settings, creating the default row on first read
    pub async fn get_or_create(&self) -> Result<entity::alert_setting::Model, Error> {
        let repository = AlertSettingRepository::new(self.db);

        if let Some(settings) = repository.get().await? {
            return Ok(settings);
        }

        Ok(repository.create_default().await?)
    }

    /// Updates the alert settings, creating the row first if none exists
    pub async fn update(
        &self,
        data: &UpdateAlertSettingDto,
    ) -> Result<entity::alert_setting::Model, Error> {
        let mut data = data.clone();
        data.recipient_email = data.recipient_email.filter(|email| !email.trim().is_empty());
        data.recipient_phone = data.recipient_phone.filter(|phone| !phone.trim().is_empty());

        let settings = self.get_or_create().await?;

        Ok(AlertSettingRepository::new(self.db)
            .update(settings, &data)
            .await?)
    }
}
