use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DbErr, DeleteResult, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use entity::license::LicenseState;

use crate::model::license::{CreateLicenseDto, UpdateLicenseDto};

/// A license row joined with its type and owning worker.
pub type LicenseWithRelated = (
    entity::license::Model,
    Option<entity::license_type::Model>,
    Option<entity::worker::Model>,
);

pub struct LicenseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseRepository<'a> {
    /// Creates a new instance of [`LicenseRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a license identical to the given one in every identifying field,
    /// regardless of lifecycle state
    pub async fn find_duplicate(
        &self,
        data: &CreateLicenseDto,
    ) -> Result<Option<entity::license::Model>, DbErr> {
        let code_filter = match data.code.as_deref() {
            Some(code) => entity::license::Column::Code.eq(code),
            None => entity::license::Column::Code.is_null(),
        };

        entity::prelude::License::find()
            .filter(entity::license::Column::WorkerId.eq(data.worker_id))
            .filter(entity::license::Column::LicenseTypeId.eq(data.license_type_id))
            .filter(entity::license::Column::IssueDate.eq(data.issue_date))
            .filter(entity::license::Column::ExpiryDate.eq(data.expiry_date))
            .filter(code_filter)
            .one(self.db)
            .await
    }

    /// Finds the currently active license for a (worker, license type) pair
    pub async fn find_active(
        &self,
        worker_id: i32,
        license_type_id: i32,
    ) -> Result<Option<entity::license::Model>, DbErr> {
        entity::prelude::License::find()
            .filter(entity::license::Column::WorkerId.eq(worker_id))
            .filter(entity::license::Column::LicenseTypeId.eq(license_type_id))
            .filter(entity::license::Column::State.eq(LicenseState::Active.to_value()))
            .one(self.db)
            .await
    }

    /// Inserts a new license in the given state, optionally demoting every
    /// currently active license of the same (worker, type) pair to replaced.
    ///
    /// Demotion and insert run in one transaction so the single-active-license
    /// invariant holds even if either statement fails.
    pub async fn insert_with_state(
        &self,
        data: &CreateLicenseDto,
        state: LicenseState,
        demote_existing: bool,
    ) -> Result<entity::license::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now().naive_utc();

        if demote_existing {
            entity::prelude::License::update_many()
                .col_expr(
                    entity::license::Column::State,
                    Expr::value(LicenseState::Replaced.to_value()),
                )
                .col_expr(entity::license::Column::UpdatedAt, Expr::value(now))
                .filter(entity::license::Column::WorkerId.eq(data.worker_id))
                .filter(entity::license::Column::LicenseTypeId.eq(data.license_type_id))
                .filter(entity::license::Column::State.eq(LicenseState::Active.to_value()))
                .exec(&txn)
                .await?;
        }

        let license = entity::license::ActiveModel {
            worker_id: ActiveValue::Set(data.worker_id),
            license_type_id: ActiveValue::Set(data.license_type_id),
            code: ActiveValue::Set(data.code.clone()),
            issue_date: ActiveValue::Set(data.issue_date),
            expiry_date: ActiveValue::Set(data.expiry_date),
            state: ActiveValue::Set(state),
            notes: ActiveValue::Set(data.notes.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(license)
    }

    /// Gets a license by its ID
    pub async fn get(&self, license_id: i32) -> Result<Option<entity::license::Model>, DbErr> {
        entity::prelude::License::find_by_id(license_id)
            .one(self.db)
            .await
    }

    /// Gets a license with its type and worker attached
    pub async fn get_with_related(
        &self,
        license_id: i32,
    ) -> Result<Option<LicenseWithRelated>, DbErr> {
        let found = entity::prelude::License::find_by_id(license_id)
            .find_also_related(entity::prelude::LicenseType)
            .one(self.db)
            .await?;

        let (license, license_type) = match found {
            Some(pair) => pair,
            None => return Ok(None),
        };

        let worker = entity::prelude::Worker::find_by_id(license.worker_id)
            .one(self.db)
            .await?;

        Ok(Some((license, license_type, worker)))
    }

    /// Gets all licenses for a worker with their types, ordered by expiry date
    pub async fn get_for_worker(
        &self,
        worker_id: i32,
    ) -> Result<Vec<(entity::license::Model, Option<entity::license_type::Model>)>, DbErr> {
        entity::prelude::License::find()
            .filter(entity::license::Column::WorkerId.eq(worker_id))
            .find_also_related(entity::prelude::LicenseType)
            .order_by_asc(entity::license::Column::ExpiryDate)
            .all(self.db)
            .await
    }

    /// Gets licenses with their types for a set of workers, ordered by expiry date
    pub async fn get_for_workers(
        &self,
        worker_ids: &[i32],
    ) -> Result<Vec<(entity::license::Model, Option<entity::license_type::Model>)>, DbErr> {
        if worker_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::License::find()
            .filter(entity::license::Column::WorkerId.is_in(worker_ids.iter().copied()))
            .find_also_related(entity::prelude::LicenseType)
            .order_by_asc(entity::license::Column::ExpiryDate)
            .all(self.db)
            .await
    }

    /// Gets every license with type and worker attached, ordered by expiry date
    pub async fn get_all_with_related(&self) -> Result<Vec<LicenseWithRelated>, DbErr> {
        let licenses = entity::prelude::License::find()
            .find_also_related(entity::prelude::LicenseType)
            .order_by_asc(entity::license::Column::ExpiryDate)
            .all(self.db)
            .await?;

        self.attach_workers(licenses).await
    }

    /// Gets all active licenses
    pub async fn get_active(&self) -> Result<Vec<entity::license::Model>, DbErr> {
        entity::prelude::License::find()
            .filter(entity::license::Column::State.eq(LicenseState::Active.to_value()))
            .all(self.db)
            .await
    }

    /// Gets active licenses expiring on or before the cutoff date, with type
    /// and worker attached — the expiry sweep's working set
    pub async fn get_active_expiring_before(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<LicenseWithRelated>, DbErr> {
        let licenses = entity::prelude::License::find()
            .filter(entity::license::Column::State.eq(LicenseState::Active.to_value()))
            .filter(entity::license::Column::ExpiryDate.lte(cutoff))
            .find_also_related(entity::prelude::LicenseType)
            .order_by_asc(entity::license::Column::ExpiryDate)
            .all(self.db)
            .await?;

        self.attach_workers(licenses).await
    }

    /// Updates a license's editable fields, returning None if it does not exist.
    ///
    /// Lifecycle state is deliberately untouched; supersession decisions only
    /// happen when a new record is added.
    pub async fn update(
        &self,
        license_id: i32,
        data: &UpdateLicenseDto,
    ) -> Result<Option<entity::license::Model>, DbErr> {
        let license = match self.get(license_id).await? {
            Some(license) => license,
            None => return Ok(None),
        };

        let mut license_am = license.into_active_model();
        license_am.license_type_id = ActiveValue::Set(data.license_type_id);
        license_am.code = ActiveValue::Set(data.code.clone());
        license_am.issue_date = ActiveValue::Set(data.issue_date);
        license_am.expiry_date = ActiveValue::Set(data.expiry_date);
        license_am.notes = ActiveValue::Set(data.notes.clone());
        license_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(license_am.update(self.db).await?))
    }

    /// Deletes a license; alert log rows cascade with it
    pub async fn delete(&self, license_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::License::delete_by_id(license_id)
            .exec(self.db)
            .await
    }

    /// Counts all licenses
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::License::find().count(self.db).await
    }

    async fn attach_workers(
        &self,
        licenses: Vec<(entity::license::Model, Option<entity::license_type::Model>)>,
    ) -> Result<Vec<LicenseWithRelated>, DbErr> {
        let worker_ids: Vec<i32> = licenses.iter().map(|(l, _)| l.worker_id).collect();

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

        Ok(licenses
            .into_iter()
            .map(|(license, license_type)| {
                let worker = workers.get(&license.worker_id).cloned();
                (license, license_type, worker)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

    use entity::license::LicenseState;

    use super::LicenseRepository;
    use crate::model::license::CreateLicenseDto;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);

        for stmt in [
            schema.create_table_from_entity(entity::prelude::Worker),
            schema.create_table_from_entity(entity::prelude::LicenseType),
            schema.create_table_from_entity(entity::prelude::License),
        ] {
            db.execute(&stmt).await?;
        }

        let worker_repository = crate::server::data::worker::WorkerRepository::new(&db);
        worker_repository
            .create(&crate::model::worker::CreateWorkerDto {
                first_name: "Dana".to_string(),
                last_name: "Ironside".to_string(),
                email: None,
                phone: None,
                position: None,
                notes: None,
            })
            .await?;

        let license_type_repository =
            crate::server::data::license_type::LicenseTypeRepository::new(&db);
        license_type_repository
            .create("Working at Heights", None)
            .await?;

        Ok(db)
    }

    fn license_dto(expiry: NaiveDate) -> CreateLicenseDto {
        CreateLicenseDto {
            worker_id: 1,
            license_type_id: 1,
            code: Some("WH-1042".to_string()),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expiry_date: expiry,
            notes: None,
        }
    }

    /// Expect the duplicate lookup to match on every identifying field including a null code
    #[tokio::test]
    async fn test_find_duplicate_matches_exact_fields() -> Result<(), DbErr> {
        let db = setup().await?;
        let license_repository = LicenseRepository::new(&db);

        let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        license_repository
            .insert_with_state(&license_dto(expiry), LicenseState::Active, false)
            .await?;

        let duplicate = license_repository.find_duplicate(&license_dto(expiry)).await?;
        assert!(duplicate.is_some());

        let mut different_code = license_dto(expiry);
        different_code.code = None;
        let miss = license_repository.find_duplicate(&different_code).await?;
        assert!(miss.is_none());

        Ok(())
    }

    /// Expect demotion to replace the previously active license atomically
    #[tokio::test]
    async fn test_insert_with_state_demotes_active() -> Result<(), DbErr> {
        let db = setup().await?;
        let license_repository = LicenseRepository::new(&db);

        let first = license_repository
            .insert_with_state(
                &license_dto(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
                LicenseState::Active,
                false,
            )
            .await?;

        let mut newer = license_dto(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        newer.code = Some("WH-2077".to_string());
        let second = license_repository
            .insert_with_state(&newer, LicenseState::Active, true)
            .await?;

        let first_after = license_repository.get(first.id).await?.unwrap();
        assert_eq!(first_after.state, LicenseState::Replaced);

        let active = license_repository.find_active(1, 1).await?.unwrap();
        assert_eq!(active.id, second.id);

        Ok(())
    }
}
