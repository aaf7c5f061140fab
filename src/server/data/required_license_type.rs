use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

/// A required license type entry joined with its type and owning worker.
pub type RequiredWithRelated = (
    entity::worker_required_license_type::Model,
    Option<entity::license_type::Model>,
    Option<entity::worker::Model>,
);

pub struct RequiredLicenseTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RequiredLicenseTypeRepository<'a> {
    /// Creates a new instance of [`RequiredLicenseTypeRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a worker's required license types with the type attached, ordered
    /// by type name
    pub async fn get_for_worker(
        &self,
        worker_id: i32,
    ) -> Result<
        Vec<(
            entity::worker_required_license_type::Model,
            Option<entity::license_type::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::WorkerRequiredLicenseType::find()
            .filter(entity::worker_required_license_type::Column::WorkerId.eq(worker_id))
            .find_also_related(entity::prelude::LicenseType)
            .order_by_asc(entity::license_type::Column::Name)
            .all(self.db)
            .await
    }

    /// Replaces a worker's required license types with the given set.
    ///
    /// Delete and re-insert run in one transaction so a failure never leaves
    /// the worker with a partial requirement list.
    pub async fn replace_for_worker(
        &self,
        worker_id: i32,
        license_type_ids: &[i32],
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::WorkerRequiredLicenseType::delete_many()
            .filter(entity::worker_required_license_type::Column::WorkerId.eq(worker_id))
            .exec(&txn)
            .await?;

        let now = Utc::now().naive_utc();
        for license_type_id in license_type_ids {
            entity::worker_required_license_type::ActiveModel {
                worker_id: ActiveValue::Set(worker_id),
                license_type_id: ActiveValue::Set(*license_type_id),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Gets every required license type entry with type and worker attached
    pub async fn get_all_with_related(&self) -> Result<Vec<RequiredWithRelated>, DbErr> {
        let entries = entity::prelude::WorkerRequiredLicenseType::find()
            .find_also_related(entity::prelude::LicenseType)
            .all(self.db)
            .await?;

        let worker_ids: Vec<i32> = entries.iter().map(|(e, _)| e.worker_id).collect();

        let workers: HashMap<i32, entity::worker::Model> = if worker_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Worker::find()
                .filter(entity::worker::Column::Id.is_in(worker_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|w| (w.id, w))
                .collect()
        };

        Ok(entries
            .into_iter()
            .map(|(entry, license_type)| {
                let worker = workers.get(&entry.worker_id).cloned();
                (entry, license_type, worker)
            })
            .collect())
    }
}
