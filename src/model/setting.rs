use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlertSettingDto {
    pub id: i32,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub warning_90_days: bool,
    pub warning_60_days: bool,
    pub warning_30_days: bool,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<entity::alert_setting::Model> for AlertSettingDto {
    fn from(model: entity::alert_setting::Model) -> Self {
        Self {
            id: model.id,
            email_enabled: model.email_enabled,
            sms_enabled: model.sms_enabled,
            warning_90_days: model.warning_90_days,
            warning_60_days: model.warning_60_days,
            warning_30_days: model.warning_30_days,
            recipient_email: model.recipient_email,
            recipient_phone: model.recipient_phone,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateAlertSettingDto {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub warning_90_days: bool,
    pub warning_60_days: bool,
    pub warning_30_days: bool,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
}
