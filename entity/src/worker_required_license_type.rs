use sea_orm::entity::prelude::*;

/// Declares that a worker must hold a license of the given type, independent
/// of whether a matching active license currently exists.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "worker_required_license_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub worker_id: i32,
    pub license_type_id: i32,
    pub created_at: DateTime,
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

impl ActiveModelBehavior for ActiveModel {}
