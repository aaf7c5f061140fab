//! Tests for RequirementService::find_missing.

use chrono::{Duration, Utc};

use entity::license::LicenseState;
use heimdall::server::service::requirement::RequirementService;
use heimdall_test_utils::prelude::*;

/// Expect a required type with no license at all to be reported missing
#[tokio::test]
async fn reports_type_without_license() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let heights = factory::insert_license_type(&test.db, "Working at Heights").await?;
    let first_aid = factory::insert_license_type(&test.db, "First Aid / CPR").await?;

    factory::insert_required_license_type(&test.db, worker.id, heights.id).await?;
    factory::insert_required_license_type(&test.db, worker.id, first_aid.id).await?;
    factory::insert_license(
        &test.db,
        worker.id,
        heights.id,
        Utc::now().date_naive() + Duration::days(120),
        LicenseState::Active,
    )
    .await?;

    let missing = RequirementService::new(&test.db)
        .find_missing()
        .await
        .expect("find missing");

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].license_type_id, first_aid.id);
    assert_eq!(missing[0].license_type_name, "First Aid / CPR");
    assert_eq!(missing[0].worker.id, worker.id);

    Ok(())
}

/// Expect a requirement covered only by a replaced license to be missing
#[tokio::test]
async fn replaced_license_does_not_cover() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let heights = factory::insert_license_type(&test.db, "Working at Heights").await?;

    factory::insert_required_license_type(&test.db, worker.id, heights.id).await?;
    factory::insert_license(
        &test.db,
        worker.id,
        heights.id,
        Utc::now().date_naive() + Duration::days(120),
        LicenseState::Replaced,
    )
    .await?;

    let missing = RequirementService::new(&test.db)
        .find_missing()
        .await
        .expect("find missing");

    assert_eq!(missing.len(), 1);

    Ok(())
}

/// Expect an expired but still active license to count as coverage; expiry is
/// the alert pipeline's concern, not the requirement resolver's
#[tokio::test]
async fn expired_active_license_still_covers() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let heights = factory::insert_license_type(&test.db, "Working at Heights").await?;

    factory::insert_required_license_type(&test.db, worker.id, heights.id).await?;
    factory::insert_license(
        &test.db,
        worker.id,
        heights.id,
        Utc::now().date_naive() - Duration::days(30),
        LicenseState::Active,
    )
    .await?;

    let missing = RequirementService::new(&test.db)
        .find_missing()
        .await
        .expect("find missing");

    assert!(missing.is_empty());

    Ok(())
}

/// Expect no results with no requirements defined
#[tokio::test]
async fn empty_without_requirements() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    factory::insert_worker(&test.db, "Dana", "Ironside").await?;

    let missing = RequirementService::new(&test.db)
        .find_missing()
        .await
        .expect("find missing");

    assert!(missing.is_empty());

    Ok(())
}
