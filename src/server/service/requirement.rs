//! Missing-license detection.
//!
//! A worker is missing a license type when a requirement entry exists for the
//! pair but no active license covers it. Replaced and expired-but-active
//! records are treated differently on purpose: an expired license still
//! exists and surfaces through expiry alerts, while a replaced one never
//! counts as coverage on its own — its replacement does.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;

use entity::license::LicenseState;

use crate::{
    model::license::{MissingLicenseDto, WorkerSummaryDto},
    server::{
        data::license::LicenseRepository,
        data::required_license_type::RequiredLicenseTypeRepository, error::Error,
    },
};

/// Computes which requirement entries have no covering active license.
///
/// Pure set difference over (worker, type) keys: an entry is returned iff its
/// key is absent from the active set. Order-independent, no duplicates.
pub fn missing_requirements<'a>(
    required: &'a [entity::worker_required_license_type::Model],
    active_licenses: &[entity::license::Model],
) -> Vec<&'a entity::worker_required_license_type::Model> {
    let covered: HashSet<(i32, i32)> = active_licenses
        .iter()
        .filter(|license| license.state == LicenseState::Active)
        .map(|license| (license.worker_id, license.license_type_id))
        .collect();

    required
        .iter()
        .filter(|entry| !covered.contains(&(entry.worker_id, entry.license_type_id)))
        .collect()
}

pub struct RequirementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequirementService<'a> {
    /// Creates a new instance of [`RequirementService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds every required license type no worker currently covers with an
    /// active license, enriched for the licenses-needed view
    pub async fn find_missing(&self) -> Result<Vec<MissingLicenseDto>, Error> {
        let active_licenses = LicenseRepository::new(self.db).get_active().await?;
        let entries = RequiredLicenseTypeRepository::new(self.db)
            .get_all_with_related()
            .await?;

        let required: Vec<entity::worker_required_license_type::Model> =
            entries.iter().map(|(entry, _, _)| entry.clone()).collect();
        let missing_ids: HashSet<i32> = missing_requirements(&required, &active_licenses)
            .into_iter()
            .map(|entry| entry.id)
            .collect();

        let missing = entries
            .into_iter()
            .filter(|(entry, _, _)| missing_ids.contains(&entry.id))
            .filter_map(|(entry, license_type, worker)| {
                let license_type = license_type?;
                let worker = worker?;
                Some(MissingLicenseDto {
                    license_type_id: entry.license_type_id,
                    license_type_name: license_type.name,
                    worker: WorkerSummaryDto {
                        id: worker.id,
                        first_name: worker.first_name,
                        last_name: worker.last_name,
                        email: worker.email,
                        phone: worker.phone,
                        position: worker.position,
                    },
                })
            })
            .collect();

        Ok(missing)
    }
}
