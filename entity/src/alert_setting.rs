use sea_orm::entity::prelude::*;

/// Singleton notification configuration, created lazily on first read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alert_setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub warning_90_days: bool,
    pub warning_60_days: bool,
    pub warning_30_days: bool,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
