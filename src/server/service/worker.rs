use std::collections::HashMap;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        license::{LicenseDto, LicenseTypeDto, LicenseWithTypeDto},
        worker::{CreateWorkerDto, RequiredLicenseTypeDto, WorkerDto, WorkerWithLicensesDto},
    },
    server::{
        data::{
            license::LicenseRepository, license_type::LicenseTypeRepository,
            required_license_type::RequiredLicenseTypeRepository, worker::WorkerRepository,
        },
        error::{license::LicenseError, Error},
        service::license::status,
    },
};

pub struct WorkerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkerService<'a> {
    /// Creates a new instance of [`WorkerService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists workers with their licenses attached, optionally filtered by a
    /// search string, ordered by last name
    pub async fn list_workers(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<WorkerWithLicensesDto>, Error> {
        let workers = WorkerRepository::new(self.db).get_all(search).await?;

        let worker_ids: Vec<i32> = workers.iter().map(|w| w.id).collect();
        let licenses = LicenseRepository::new(self.db)
            .get_for_workers(&worker_ids)
            .await?;

        let mut by_worker: HashMap<i32, Vec<(entity::license::Model, Option<entity::license_type::Model>)>> =
            HashMap::new();
        for (license, license_type) in licenses {
            by_worker
                .entry(license.worker_id)
                .or_default()
                .push((license, license_type));
        }

        let today = Utc::now().date_naive();

        Ok(workers
            .into_iter()
            .map(|worker| {
                let licenses = by_worker.remove(&worker.id).unwrap_or_default();
                build_worker_dto(worker, licenses, today)
            })
            .collect())
    }

    /// Gets a worker with licenses ordered by expiry date
    pub async fn get_worker(&self, worker_id: i32) -> Result<WorkerWithLicensesDto, Error> {
        let worker = WorkerRepository::new(self.db)
            .get(worker_id)
            .await?
            .ok_or(LicenseError::WorkerNotFound(worker_id))?;

        let licenses = LicenseRepository::new(self.db)
            .get_for_worker(worker_id)
            .await?;

        Ok(build_worker_dto(worker, licenses, Utc::now().date_naive()))
    }

    /// Creates a worker after validating its contact fields
    pub async fn create_worker(&self, data: &CreateWorkerDto) -> Result<WorkerDto, Error> {
        let data = validate(data)?;

        let worker = WorkerRepository::new(self.db).create(&data).await?;

        Ok(worker.into())
    }

    /// Updates a worker's contact fields
    pub async fn update_worker(
        &self,
        worker_id: i32,
        data: &CreateWorkerDto,
    ) -> Result<WorkerDto, Error> {
        let data = validate(data)?;

        let worker = WorkerRepository::new(self.db)
            .update(worker_id, &data)
            .await?
            .ok_or(LicenseError::WorkerNotFound(worker_id))?;

        Ok(worker.into())
    }

    /// Deletes a worker; licenses and requirement entries cascade with it
    pub async fn delete_worker(&self, worker_id: i32) -> Result<(), Error> {
        let result = WorkerRepository::new(self.db).delete(worker_id).await?;

        if result.rows_affected == 0 {
            return Err(LicenseError::WorkerNotFound(worker_id).into());
        }

        Ok(())
    }

    /// Gets a worker's required license types ordered by type name
    pub async fn get_required_license_types(
        &self,
        worker_id: i32,
    ) -> Result<Vec<RequiredLicenseTypeDto>, Error> {
        if WorkerRepository::new(self.db).get(worker_id).await?.is_none() {
            return Err(LicenseError::WorkerNotFound(worker_id).into());
        }

        let entries = RequiredLicenseTypeRepository::new(self.db)
            .get_for_worker(worker_id)
            .await?;

        Ok(entries
            .into_iter()
            .filter_map(|(entry, license_type)| {
                Some(RequiredLicenseTypeDto {
                    id: entry.id,
                    worker_id: entry.worker_id,
                    license_type_id: entry.license_type_id,
                    license_type: LicenseTypeDto::from(license_type?),
                })
            })
            .collect())
    }

    /// Replaces a worker's required license types with the given set,
    /// returning the updated list
    pub async fn set_required_license_types(
        &self,
        worker_id: i32,
        license_type_ids: &[i32],
    ) -> Result<Vec<RequiredLicenseTypeDto>, Error> {
        if WorkerRepository::new(self.db).get(worker_id).await?.is_none() {
            return Err(LicenseError::WorkerNotFound(worker_id).into());
        }

        let license_type_repository = LicenseTypeRepository::new(self.db);
        for license_type_id in license_type_ids {
            if license_type_repository.get(*license_type_id).await?.is_none() {
                return Err(LicenseError::LicenseTypeNotFound(*license_type_id).into());
            }
        }

        RequiredLicenseTypeRepository::new(self.db)
            .replace_for_worker(worker_id, license_type_ids)
            .await?;

        self.get_required_license_types(worker_id).await
    }
}

fn build_worker_dto(
    worker: entity::worker::Model,
    licenses: Vec<(entity::license::Model, Option<entity::license_type::Model>)>,
    today: chrono::NaiveDate,
) -> WorkerWithLicensesDto {
    let license_models: Vec<entity::license::Model> =
        licenses.iter().map(|(l, _)| l.clone()).collect();
    let worst = status::worst_status(&license_models, today);

    WorkerWithLicensesDto {
        worker: worker.into(),
        licenses: licenses
            .into_iter()
            .filter_map(|(license, license_type)| {
                Some(LicenseWithTypeDto {
                    license: LicenseDto::from(license),
                    license_type: LicenseTypeDto::from(license_type?),
                })
            })
            .collect(),
        worst_status: worst.map(Into::into),
    }
}

/// Rejects missing names and malformed emails before any write, collapsing
/// empty optional fields to None
fn validate(data: &CreateWorkerDto) -> Result<CreateWorkerDto, LicenseError> {
    let mut data = data.clone();

    data.first_name = data.first_name.trim().to_string();
    data.last_name = data.last_name.trim().to_string();

    if data.first_name.is_empty() {
        return Err(LicenseError::Validation("First name is required".to_string()));
    }
    if data.last_name.is_empty() {
        return Err(LicenseError::Validation("Last name is required".to_string()));
    }

    data.email = data.email.filter(|email| !email.trim().is_empty());
    if let Some(email) = &data.email {
        if !email.contains('@') {
            return Err(LicenseError::Validation("Invalid email".to_string()));
        }
    }

    data.phone = data.phone.filter(|phone| !phone.trim().is_empty());
    data.position = data.position.filter(|position| !position.trim().is_empty());
    data.notes = data.notes.filter(|notes| !notes.trim().is_empty());

    Ok(data)
}
