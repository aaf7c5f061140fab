use sea_orm::entity::prelude::*;

/// Channel an alert was dispatched over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum AlertChannel {
    #[sea_orm(string_value = "email")]
    Email,
    #[sea_orm(string_value = "sms")]
    Sms,
}

/// Urgency tier an alert was sent at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum AlertLevel {
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "30_days")]
    Days30,
    #[sea_orm(string_value = "60_days")]
    Days60,
    #[sea_orm(string_value = "90_days")]
    Days90,
}

/// Immutable record of a single notification attempt, one row per channel.
/// Never updated after insert; read back only for duplicate suppression and
/// the audit history view.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alert_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub license_id: i32,
    pub channel: AlertChannel,
    pub level: AlertLevel,
    pub success: bool,
    pub error: Option<String>,
    pub sent_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::license::Entity",
        from = "Column::LicenseId",
        to = "super::license::Column::Id"
    )]
    License,
}

impl Related<super::license::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::License.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
