//! License lifecycle management.
//!
//! The supersession rules live here: adding a license decides which record of
//! a (worker, type) pair stays active, and the repository applies that
//! decision atomically.

pub mod status;

use sea_orm::DatabaseConnection;

use entity::license::LicenseState;

use crate::{
    model::license::{CreateLicenseDto, UpdateLicenseDto},
    server::{
        data::license::{LicenseRepository, LicenseWithRelated},
        data::license_type::LicenseTypeRepository,
        data::worker::WorkerRepository,
        error::{license::LicenseError, Error},
    },
};

pub struct LicenseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseService<'a> {
    /// Creates a new instance of [`LicenseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a license record, resolving which record of the (worker, type)
    /// pair remains active.
    ///
    /// An exact duplicate (same worker, type, dates, and code, in any state)
    /// is rejected outright. Otherwise the record with the latest expiry date
    /// wins: a new license with `expiry_date` at or past the current active
    /// one's demotes it to replaced; a strictly earlier expiry means the new
    /// record is filed as already replaced — the case of uploading an older
    /// card after a newer one is on file.
    pub async fn add_license(&self, data: &CreateLicenseDto) -> Result<LicenseWithRelated, Error> {
        let data = normalize(data);

        let worker_repository = WorkerRepository::new(self.db);
        if worker_repository.get(data.worker_id).await?.is_none() {
            return Err(LicenseError::WorkerNotFound(data.worker_id).into());
        }

        let license_type_repository = LicenseTypeRepository::new(self.db);
        let license_type = license_type_repository
            .get(data.license_type_id)
            .await?
            .ok_or(LicenseError::LicenseTypeNotFound(data.license_type_id))?;

        let license_repository = LicenseRepository::new(self.db);

        if license_repository.find_duplicate(&data).await?.is_some() {
            return Err(LicenseError::DuplicateLicense(license_type.name).into());
        }

        let existing_active = license_repository
            .find_active(data.worker_id, data.license_type_id)
            .await?;

        let new_wins = match &existing_active {
            Some(active) => data.expiry_date >= active.expiry_date,
            None => true,
        };

        let state = if new_wins {
            LicenseState::Active
        } else {
            LicenseState::Replaced
        };
        let demote_existing = new_wins && existing_active.is_some();

        let license = license_repository
            .insert_with_state(&data, state, demote_existing)
            .await?;

        license_repository
            .get_with_related(license.id)
            .await?
            .ok_or_else(|| {
                Error::InternalError(format!("License {} vanished after insert", license.id))
            })
    }

    /// Gets a license with its type and worker attached
    pub async fn get_license(&self, license_id: i32) -> Result<LicenseWithRelated, Error> {
        LicenseRepository::new(self.db)
            .get_with_related(license_id)
            .await?
            .ok_or_else(|| LicenseError::LicenseNotFound(license_id).into())
    }

    /// Updates a license's fields.
    ///
    /// Lifecycle state is never edited here; only adding a new record can
    /// change which license is active.
    pub async fn update_license(
        &self,
        license_id: i32,
        data: &UpdateLicenseDto,
    ) -> Result<LicenseWithRelated, Error> {
        let data = normalize_update(data);

        let license_type_repository = LicenseTypeRepository::new(self.db);
        if license_type_repository
            .get(data.license_type_id)
            .await?
            .is_none()
        {
            return Err(LicenseError::LicenseTypeNotFound(data.license_type_id).into());
        }

        let license_repository = LicenseRepository::new(self.db);
        let license = license_repository
            .update(license_id, &data)
            .await?
            .ok_or(LicenseError::LicenseNotFound(license_id))?;

        license_repository
            .get_with_related(license.id)
            .await?
            .ok_or_else(|| LicenseError::LicenseNotFound(license_id).into())
    }

    /// Deletes a license; its alert log history goes with it
    pub async fn delete_license(&self, license_id: i32) -> Result<(), Error> {
        let result = LicenseRepository::new(self.db).delete(license_id).await?;

        if result.rows_affected == 0 {
            return Err(LicenseError::LicenseNotFound(license_id).into());
        }

        Ok(())
    }
}

/// Collapses empty optional strings to None before any lookup or write
fn normalize(data: &CreateLicenseDto) -> CreateLicenseDto {
    let mut data = data.clone();
    data.code = data.code.filter(|code| !code.trim().is_empty());
    data.notes = data.notes.filter(|notes| !notes.trim().is_empty());
    data
}

fn normalize_update(data: &UpdateLicenseDto) -> UpdateLicenseDto {
    let mut data = data.clone();
    data.code = data.code.filter(|code| !code.trim().is_empty());
    data.notes = data.notes.filter(|notes| !notes.trim().is_empty());
    data
}
