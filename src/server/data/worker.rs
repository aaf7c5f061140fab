use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    DeleteResult, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::worker::CreateWorkerDto;

pub struct WorkerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkerRepository<'a> {
    /// Creates a new instance of [`WorkerRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new worker
    pub async fn create(&self, data: &CreateWorkerDto) -> Result<entity::worker::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let worker = entity::worker::ActiveModel {
            first_name: ActiveValue::Set(data.first_name.clone()),
            last_name: ActiveValue::Set(data.last_name.clone()),
            email: ActiveValue::Set(data.email.clone()),
            phone: ActiveValue::Set(data.phone.clone()),
            position: ActiveValue::Set(data.position.clone()),
            notes: ActiveValue::Set(data.notes.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        worker.insert(self.db).await
    }

    /// Gets a worker by its ID
    pub async fn get(&self, worker_id: i32) -> Result<Option<entity::worker::Model>, DbErr> {
        entity::prelude::Worker::find_by_id(worker_id)
            .one(self.db)
            .await
    }

    /// Gets workers by a set of IDs
    pub async fn get_by_ids(&self, worker_ids: &[i32]) -> Result<Vec<entity::worker::Model>, DbErr> {
        if worker_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Worker::find()
            .filter(entity::worker::Column::Id.is_in(worker_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Gets all workers ordered by last name, optionally filtered by a
    /// case-insensitive substring match over name and position
    pub async fn get_all(&self, search: Option<&str>) -> Result<Vec<entity::worker::Model>, DbErr> {
        let mut query = entity::prelude::Worker::find();

        if let Some(q) = search.filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::worker::Column::FirstName)))
                            .like(pattern.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::worker::Column::LastName)))
                            .like(pattern.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::worker::Column::Position)))
                            .like(pattern.as_str()),
                    ),
            );
        }

        query
            .order_by_asc(entity::worker::Column::LastName)
            .all(self.db)
            .await
    }

    /// Updates a worker's contact fields, returning None if it does not exist
    pub async fn update(
        &self,
        worker_id: i32,
        data: &CreateWorkerDto,
    ) -> Result<Option<entity::worker::Model>, DbErr> {
        let worker = match self.get(worker_id).await? {
            Some(worker) => worker,
            None => return Ok(None),
        };

        let mut worker_am = worker.into_active_model();
        worker_am.first_name = ActiveValue::Set(data.first_name.clone());
        worker_am.last_name = ActiveValue::Set(data.last_name.clone());
        worker_am.email = ActiveValue::Set(data.email.clone());
        worker_am.phone = ActiveValue::Set(data.phone.clone());
        worker_am.position = ActiveValue::Set(data.position.clone());
        worker_am.notes = ActiveValue::Set(data.notes.clone());
        worker_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(worker_am.update(self.db).await?))
    }

    /// Deletes a worker
    ///
    /// Deleting cascades to the worker's licenses and required license type
    /// entries. Returns OK regardless of the worker existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, worker_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Worker::delete_by_id(worker_id)
            .exec(self.db)
            .await
    }

    /// Counts all workers
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Worker::find().count(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

    use super::WorkerRepository;
    use crate::model::worker::CreateWorkerDto;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);

        let stmt = schema.create_table_from_entity(entity::prelude::Worker);
        db.execute(&stmt).await?;

        Ok(db)
    }

    fn worker_dto(first_name: &str, last_name: &str) -> CreateWorkerDto {
        CreateWorkerDto {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            phone: None,
            position: Some("Site Supervisor".to_string()),
            notes: None,
        }
    }

    /// Expect success when creating a new worker
    #[tokio::test]
    async fn test_create_worker_success() -> Result<(), DbErr> {
        let db = setup().await?;
        let worker_repository = WorkerRepository::new(&db);

        let result = worker_repository.create(&worker_dto("Dana", "Ironside")).await;

        assert!(result.is_ok());

        Ok(())
    }

    /// Expect search to match case-insensitively on first name, last name, and position
    #[tokio::test]
    async fn test_get_all_search_matches() -> Result<(), DbErr> {
        let db = setup().await?;
        let worker_repository = WorkerRepository::new(&db);

        worker_repository.create(&worker_dto("Dana", "Ironside")).await?;
        worker_repository.create(&worker_dto("Marcus", "Webb")).await?;

        let by_first = worker_repository.get_all(Some("dana")).await?;
        assert_eq!(by_first.len(), 1);

        let by_position = worker_repository.get_all(Some("supervisor")).await?;
        assert_eq!(by_position.len(), 2);

        let no_match = worker_repository.get_all(Some("crane")).await?;
        assert!(no_match.is_empty());

        Ok(())
    }

    /// Expect workers ordered by last name when no search is given
    #[tokio::test]
    async fn test_get_all_ordered_by_last_name() -> Result<(), DbErr> {
        let db = setup().await?;
        let worker_repository = WorkerRepository::new(&db);

        worker_repository.create(&worker_dto("Marcus", "Webb")).await?;
        worker_repository.create(&worker_dto("Dana", "Ironside")).await?;

        let workers = worker_repository.get_all(None).await?;

        assert_eq!(workers.len(), 2);
        assert_eq!(workers[0].last_name, "Ironside");
        assert_eq!(workers[1].last_name, "Webb");

        Ok(())
    }

    /// Expect no rows affected when deleting a worker that does not exist
    #[tokio::test]
    async fn test_delete_worker_none() -> Result<(), DbErr> {
        let db = setup().await?;
        let worker_repository = WorkerRepository::new(&db);

        let worker = worker_repository.create(&worker_dto("Dana", "Ironside")).await?;

        let result = worker_repository.delete(worker.id + 1).await?;

        assert_eq!(result.rows_affected, 0);

        Ok(())
    }
}
