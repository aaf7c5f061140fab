//! Tests for LicenseService::add_license.
//!
//! This module verifies the supersession rules: exact duplicates are rejected,
//! the record with the latest expiry date for a (worker, type) pair stays
//! active, and exactly one active license remains after every outcome.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use entity::license::LicenseState;
use heimdall::model::license::CreateLicenseDto;
use heimdall::server::{
    error::{license::LicenseError, Error},
    service::license::LicenseService,
};
use heimdall_test_utils::prelude::*;

fn dto(worker_id: i32, license_type_id: i32, issue: (i32, u32, u32), expiry: (i32, u32, u32)) -> CreateLicenseDto {
    CreateLicenseDto {
        worker_id,
        license_type_id,
        code: Some("WH-1042".to_string()),
        issue_date: NaiveDate::from_ymd_opt(issue.0, issue.1, issue.2).unwrap(),
        expiry_date: NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2).unwrap(),
        notes: None,
    }
}

async fn count_active(
    db: &sea_orm::DatabaseConnection,
    worker_id: i32,
    license_type_id: i32,
) -> Result<u64, TestError> {
    use sea_orm::{ActiveEnum, PaginatorTrait};

    Ok(entity::prelude::License::find()
        .filter(entity::license::Column::WorkerId.eq(worker_id))
        .filter(entity::license::Column::LicenseTypeId.eq(license_type_id))
        .filter(entity::license::Column::State.eq(LicenseState::Active.to_value()))
        .count(db)
        .await?)
}

/// Expect the first license of a pair to be created active
#[tokio::test]
async fn creates_first_license_as_active() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);
    let (license, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 1, 1), (2025, 1, 1)))
        .await
        .expect("add first license");

    assert_eq!(license.state, LicenseState::Active);
    assert_eq!(count_active(&test.db, worker.id, license_type.id).await?, 1);

    Ok(())
}

/// Expect an identical second submission to be rejected as a duplicate,
/// leaving exactly one row
#[tokio::test]
async fn rejects_exact_duplicate() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);
    let data = dto(worker.id, license_type.id, (2024, 1, 1), (2025, 1, 1));

    license_service.add_license(&data).await.expect("first add");
    let result = license_service.add_license(&data).await;

    assert!(matches!(
        result,
        Err(Error::LicenseError(LicenseError::DuplicateLicense(_)))
    ));

    use sea_orm::PaginatorTrait;
    let total = entity::prelude::License::find().count(&test.db).await?;
    assert_eq!(total, 1);

    Ok(())
}

/// Expect a newer expiry date to demote the existing active license
#[tokio::test]
async fn newer_expiry_supersedes_active() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);

    let (first, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 1, 1), (2025, 1, 1)))
        .await
        .expect("first add");
    let (second, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 6, 1), (2026, 1, 1)))
        .await
        .expect("second add");

    let first_after = entity::prelude::License::find_by_id(first.id)
        .one(&test.db)
        .await?
        .expect("first license exists");

    assert_eq!(first_after.state, LicenseState::Replaced);
    assert_eq!(second.state, LicenseState::Active);
    assert_eq!(count_active(&test.db, worker.id, license_type.id).await?, 1);

    Ok(())
}

/// Expect a strictly earlier expiry date to be filed directly as replaced
#[tokio::test]
async fn older_expiry_is_inserted_replaced() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);

    let (first, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 1, 1), (2026, 1, 1)))
        .await
        .expect("first add");
    let (second, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2023, 1, 1), (2024, 1, 1)))
        .await
        .expect("second add");

    let first_after = entity::prelude::License::find_by_id(first.id)
        .one(&test.db)
        .await?
        .expect("first license exists");

    assert_eq!(first_after.state, LicenseState::Active);
    assert_eq!(second.state, LicenseState::Replaced);
    assert_eq!(count_active(&test.db, worker.id, license_type.id).await?, 1);

    Ok(())
}

/// Expect an equal expiry date to favor the newly added record
#[tokio::test]
async fn equal_expiry_favors_new_record() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);

    let (first, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 1, 1), (2025, 1, 1)))
        .await
        .expect("first add");
    let (second, _, _) = license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 6, 1), (2025, 1, 1)))
        .await
        .expect("second add");

    let first_after = entity::prelude::License::find_by_id(first.id)
        .one(&test.db)
        .await?
        .expect("first license exists");

    assert_eq!(first_after.state, LicenseState::Replaced);
    assert_eq!(second.state, LicenseState::Active);

    Ok(())
}

/// Expect different (worker, type) pairs to supersede independently
#[tokio::test]
async fn supersession_is_scoped_per_pair() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let other_worker = factory::insert_worker(&test.db, "Marcus", "Webb").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    let license_service = LicenseService::new(&test.db);

    license_service
        .add_license(&dto(worker.id, license_type.id, (2024, 1, 1), (2025, 1, 1)))
        .await
        .expect("worker add");
    license_service
        .add_license(&dto(other_worker.id, license_type.id, (2024, 6, 1), (2026, 1, 1)))
        .await
        .expect("other worker add");

    assert_eq!(count_active(&test.db, worker.id, license_type.id).await?, 1);
    assert_eq!(
        count_active(&test.db, other_worker.id, license_type.id).await?,
        1
    );

    Ok(())
}
