use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        license::{LicenseDto, LicenseTypeDto, LicenseWithWorkerDto, WorkerSummaryDto},
        stats::DashboardStatsDto,
    },
    server::{
        data::{license::LicenseRepository, worker::WorkerRepository},
        error::Error,
        service::license::status::{self, LicenseStatus},
    },
};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    /// Creates a new instance of [`StatsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the dashboard overview: totals, per-bucket counts over every
    /// license classified by expiry date, and the full license list ordered
    /// by expiry
    pub async fn get_stats(&self) -> Result<DashboardStatsDto, Error> {
        let total_workers = WorkerRepository::new(self.db).count().await?;
        let licenses = LicenseRepository::new(self.db).get_all_with_related().await?;

        let today = Utc::now().date_naive();

        let mut expired = 0;
        let mut expiring_30 = 0;
        let mut expiring_60 = 0;
        let mut expiring_90 = 0;
        let mut valid = 0;

        for (license, _, _) in &licenses {
            match status::classify(license.expiry_date, today).status {
                LicenseStatus::Expired => expired += 1,
                LicenseStatus::Critical => expiring_30 += 1,
                LicenseStatus::Warning => expiring_60 += 1,
                LicenseStatus::Caution => expiring_90 += 1,
                LicenseStatus::Valid => valid += 1,
                LicenseStatus::Replaced => {}
            }
        }

        let total_licenses = licenses.len() as u64;

        let license_dtos = licenses
            .into_iter()
            .filter_map(|(license, license_type, worker)| {
                Some(LicenseWithWorkerDto {
                    license: LicenseDto::from(license),
                    license_type: LicenseTypeDto::from(license_type?),
                    worker: WorkerSummaryDto::from(worker?),
                })
            })
            .collect();

        Ok(DashboardStatsDto {
            total_workers,
            total_licenses,
            expired,
            expiring_30,
            expiring_60,
            expiring_90,
            valid,
            licenses: license_dtos,
        })
    }
}
