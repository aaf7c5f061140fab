use sea_orm::entity::prelude::*;

/// Lifecycle state of a license record.
///
/// At most one license per (worker, license type) pair is `Active` at any
/// time; a record becomes `Replaced` when a newer record with an expiry date
/// at or past its own is uploaded, and never transitions back.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum LicenseState {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "replaced")]
    Replaced,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "license")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub worker_id: i32,
    pub license_type_id: i32,
    /// Free-text certificate number printed on the card; not unique.
    pub code: Option<String>,
    pub issue_date: Date,
    pub expiry_date: Date,
    pub state: LicenseState,
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::worker::Entity",
        from = "Column::WorkerId",
        to = "super::worker::Column::Id"
    )]
    Worker,
    #[sea_orm(
        belongs_to = "super::license_type::Entity",
        from = "Column::LicenseTypeId",
        to = "super::license_type::Column::Id"
    )]
    LicenseType,
    #[sea_orm(has_many = "super::alert_log::Entity")]
    AlertLog,
}

impl Related<super::worker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Worker.def()
    }
}

impl Related<super::license_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LicenseType.def()
    }
}

impl Related<super::alert_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlertLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
