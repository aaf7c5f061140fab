use sea_orm::DatabaseConnection;

use crate::server::{
    data::license_type::LicenseTypeRepository,
    error::{license::LicenseError, Error},
};

pub struct LicenseTypeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseTypeService<'a> {
    /// Creates a new instance of [`LicenseTypeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all license types ordered by name
    pub async fn list(&self) -> Result<Vec<entity::license_type::Model>, Error> {
        Ok(LicenseTypeRepository::new(self.db).get_all().await?)
    }

    /// Creates a license type, returning the existing row when the name
    /// already exists case-insensitively instead of raising a conflict
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<(entity::license_type::Model, bool), Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LicenseError::Validation("License type name is required".to_string()).into());
        }
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let repository = LicenseTypeRepository::new(self.db);

        if let Some(existing) = repository.find_by_name(name, None).await? {
            return Ok((existing, false));
        }

        let created = repository.create(name, description).await?;

        Ok((created, true))
    }

    /// Renames a license type, rejecting a name already used by another type
    pub async fn update(
        &self,
        license_type_id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<entity::license_type::Model, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LicenseError::Validation("License type name is required".to_string()).into());
        }
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let repository = LicenseTypeRepository::new(self.db);

        if repository
            .find_by_name(name, Some(license_type_id))
            .await?
            .is_some()
        {
            return Err(LicenseError::LicenseTypeNameTaken(name.to_string()).into());
        }

        repository
            .update(license_type_id, name, description)
            .await?
            .ok_or_else(|| LicenseError::LicenseTypeNotFound(license_type_id).into())
    }

    /// Deletes a license type, refusing while licenses still reference it
    pub async fn delete(&self, license_type_id: i32) -> Result<(), Error> {
        let repository = LicenseTypeRepository::new(self.db);

        let license_type = repository
            .get(license_type_id)
            .await?
            .ok_or(LicenseError::LicenseTypeNotFound(license_type_id))?;

        let count = repository.count_licenses(license_type_id).await?;
        if count > 0 {
            return Err(LicenseError::LicenseTypeInUse {
                name: license_type.name,
                count,
            }
            .into());
        }

        repository.delete(license_type_id).await?;

        Ok(())
    }
}
