use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "license_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::license::Entity")]
    License,
    #[sea_orm(has_many = "super::worker_required_license_type::Entity")]
    WorkerRequiredLicenseType,
}

impl Related<super::license::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::License.def()
    }
}

impl Related<super::worker_required_license_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkerRequiredLicenseType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
