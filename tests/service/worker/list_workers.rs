//! Tests for WorkerService::list_workers.

use chrono::{Duration, Utc};

use entity::license::LicenseState;
use heimdall::server::service::worker::WorkerService;
use heimdall_test_utils::prelude::*;

/// Expect each worker to carry its licenses and most urgent status
#[tokio::test]
async fn attaches_licenses_and_worst_status() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let heights = factory::insert_license_type(&test.db, "Working at Heights").await?;
    let first_aid = factory::insert_license_type(&test.db, "First Aid / CPR").await?;

    factory::insert_license(
        &test.db,
        worker.id,
        heights.id,
        Utc::now().date_naive() + Duration::days(12),
        LicenseState::Active,
    )
    .await?;
    factory::insert_license(
        &test.db,
        worker.id,
        first_aid.id,
        Utc::now().date_naive() + Duration::days(200),
        LicenseState::Active,
    )
    .await?;

    let workers = WorkerService::new(&test.db)
        .list_workers(None)
        .await
        .expect("list workers");

    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].licenses.len(), 2);

    let worst = workers[0].worst_status.as_ref().expect("worst status");
    assert_eq!(worst.status, "critical");
    assert_eq!(worst.days_until, 12);
    assert_eq!(worst.label, "12d left");

    Ok(())
}

/// Expect a worker with only replaced licenses to have no worst status
#[tokio::test]
async fn replaced_only_worker_has_no_status() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let heights = factory::insert_license_type(&test.db, "Working at Heights").await?;

    factory::insert_license(
        &test.db,
        worker.id,
        heights.id,
        Utc::now().date_naive() + Duration::days(12),
        LicenseState::Replaced,
    )
    .await?;

    let workers = WorkerService::new(&test.db)
        .list_workers(None)
        .await
        .expect("list workers");

    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].licenses.len(), 1);
    assert!(workers[0].worst_status.is_none());

    Ok(())
}

/// Expect the search filter to narrow the result set
#[tokio::test]
async fn search_filters_workers() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    factory::insert_worker(&test.db, "Marcus", "Webb").await?;

    let worker_service = WorkerService::new(&test.db);

    let all = worker_service.list_workers(None).await.expect("list all");
    assert_eq!(all.len(), 2);

    let filtered = worker_service
        .list_workers(Some("webb"))
        .await
        .expect("list filtered");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].worker.last_name, "Webb");

    Ok(())
}
