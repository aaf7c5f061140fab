use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct LicenseTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseTypeRepository<'a> {
    /// Creates a new instance of [`LicenseTypeRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new license type
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<entity::license_type::Model, DbErr> {
        let license_type = entity::license_type::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(description.map(str::to_string)),
            ..Default::default()
        };

        license_type.insert(self.db).await
    }

    /// Gets a license type by its ID
    pub async fn get(
        &self,
        license_type_id: i32,
    ) -> Result<Option<entity::license_type::Model>, DbErr> {
        entity::prelude::LicenseType::find_by_id(license_type_id)
            .one(self.db)
            .await
    }

    /// Gets all license types ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::license_type::Model>, DbErr> {
        entity::prelude::LicenseType::find()
            .order_by_asc(entity::license_type::Column::Name)
            .all(self.db)
            .await
    }

    /// Finds a license type by name, matching case-insensitively, optionally
    /// excluding one ID (used when renaming a type onto its own name)
    pub async fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<entity::license_type::Model>, DbErr> {
        let mut query = entity::prelude::LicenseType::find().filter(
            Expr::expr(Func::lower(Expr::col(entity::license_type::Column::Name)))
                .eq(name.to_lowercase()),
        );

        if let Some(id) = exclude_id {
            query = query.filter(entity::license_type::Column::Id.ne(id));
        }

        query.one(self.db).await
    }

    /// Updates a license type's name and description, returning None if it does not exist
    pub async fn update(
        &self,
        license_type_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<entity::license_type::Model>, DbErr> {
        let license_type = match self.get(license_type_id).await? {
            Some(license_type) => license_type,
            None => return Ok(None),
        };

        let mut license_type_am = license_type.into_active_model();
        license_type_am.name = ActiveValue::Set(name.to_string());
        license_type_am.description = ActiveValue::Set(description.map(str::to_string));

        Ok(Some(license_type_am.update(self.db).await?))
    }

    /// Deletes a license type
    pub async fn delete(&self, license_type_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::LicenseType::delete_by_id(license_type_id)
            .exec(self.db)
            .await
    }

    /// Counts licenses referencing the given type
    pub async fn count_licenses(&self, license_type_id: i32) -> Result<u64, DbErr> {
        entity::prelude::License::find()
            .filter(entity::license::Column::LicenseTypeId.eq(license_type_id))
            .count(self.db)
            .await
    }
}
