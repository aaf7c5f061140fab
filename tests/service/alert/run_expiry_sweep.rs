//! Tests for AlertService::run_expiry_sweep.
//!
//! This module verifies the alert decision pipeline end to end against an
//! in-memory database and a mock notification provider: settings gating,
//! threshold mapping, the 7-day duplicate suppression window, independent
//! per-channel dispatch, and per-channel failure accounting.

use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};

use entity::license::LicenseState;
use heimdall::server::{
    notify::{EmailClient, Notifier},
    service::alert::AlertService,
};
use heimdall_test_utils::constant::{TEST_EMAIL_API_KEY, TEST_EMAIL_FROM, TEST_RECIPIENT_EMAIL};
use heimdall_test_utils::prelude::*;

fn email_notifier(server_url: &str) -> Notifier {
    Notifier {
        email: Some(
            EmailClient::new(server_url, TEST_EMAIL_API_KEY, TEST_EMAIL_FROM)
                .expect("build email client"),
        ),
        sms: None,
    }
}

fn email_settings() -> factory::AlertSettingsFixture {
    factory::AlertSettingsFixture {
        email_enabled: true,
        recipient_email: Some(TEST_RECIPIENT_EMAIL.to_string()),
        ..Default::default()
    }
}

/// Expect an empty report when no settings row exists
#[tokio::test]
async fn reports_zero_without_settings() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    let notifier = Notifier::disabled();

    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    assert_eq!(report.checked, 0);
    assert_eq!(report.alerts_sent, 0);
    assert_eq!(report.errors, 0);
    assert_eq!(report.message, "No alert settings found");

    Ok(())
}

/// Expect an empty report when both channels are disabled
#[tokio::test]
async fn reports_zero_with_all_channels_disabled() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, factory::AlertSettingsFixture::default()).await?;
    let notifier = Notifier::disabled();

    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    assert_eq!(report.checked, 0);
    assert_eq!(report.message, "All notifications disabled");

    Ok(())
}

/// Expect a critical license to send one email and log one successful row
#[tokio::test]
async fn sends_email_for_expiring_license() -> Result<(), TestError> {
    let mut test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;
    let license = factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    let mock = test
        .server
        .mock("POST", "/emails")
        .with_status(200)
        .with_body("{\"id\":\"1\"}")
        .create_async()
        .await;

    let notifier = email_notifier(&test.server.url());
    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    mock.assert_async().await;
    assert_eq!(report.checked, 1);
    assert_eq!(report.alerts_sent, 1);
    assert_eq!(report.errors, 0);

    let logs = entity::prelude::AlertLog::find().all(&test.db).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].license_id, license.id);
    assert!(logs[0].success);

    Ok(())
}

/// Expect a second sweep within the dedup window to send nothing
#[tokio::test]
async fn second_sweep_is_suppressed() -> Result<(), TestError> {
    let mut test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    // Exactly one outbound request across both sweeps
    let mock = test
        .server
        .mock("POST", "/emails")
        .with_status(200)
        .with_body("{\"id\":\"1\"}")
        .expect(1)
        .create_async()
        .await;

    let notifier = email_notifier(&test.server.url());
    let alert_service = AlertService::new(&test.db, &notifier);

    let first = alert_service.run_expiry_sweep().await.expect("first sweep");
    let second = alert_service.run_expiry_sweep().await.expect("second sweep");

    mock.assert_async().await;
    assert_eq!(first.alerts_sent, 1);
    assert_eq!(second.alerts_sent, 0);
    assert_eq!(second.checked, 1);

    let log_count = entity::prelude::AlertLog::find().count(&test.db).await?;
    assert_eq!(log_count, 1);

    Ok(())
}

/// Expect a provider failure to be logged and counted without failing the sweep
#[tokio::test]
async fn provider_failure_is_logged_and_counted() -> Result<(), TestError> {
    let mut test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    let mock = test
        .server
        .mock("POST", "/emails")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let notifier = email_notifier(&test.server.url());
    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep completes despite failure");

    mock.assert_async().await;
    assert_eq!(report.alerts_sent, 0);
    assert_eq!(report.errors, 1);

    let logs = entity::prelude::AlertLog::find().all(&test.db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].success);
    assert!(logs[0].error.is_some());

    Ok(())
}

/// Expect a failed attempt not to suppress the next sweep
#[tokio::test]
async fn failure_does_not_suppress_retry() -> Result<(), TestError> {
    let mut test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    let failing = test
        .server
        .mock("POST", "/emails")
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;

    let notifier = email_notifier(&test.server.url());
    let alert_service = AlertService::new(&test.db, &notifier);

    let first = alert_service.run_expiry_sweep().await.expect("first sweep");
    assert_eq!(first.errors, 1);
    failing.assert_async().await;

    // Provider recovers; the retry goes out because only successes suppress
    failing.remove_async().await;
    let succeeding = test
        .server
        .mock("POST", "/emails")
        .with_status(200)
        .with_body("{\"id\":\"1\"}")
        .expect(1)
        .create_async()
        .await;

    let second = alert_service.run_expiry_sweep().await.expect("second sweep");
    assert_eq!(second.alerts_sent, 1);
    succeeding.assert_async().await;

    Ok(())
}

/// Expect an expired license to alert even with every warning threshold off
#[tokio::test]
async fn expired_license_alerts_with_warnings_disabled() -> Result<(), TestError> {
    let mut test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(
        &test.db,
        factory::AlertSettingsFixture {
            email_enabled: true,
            recipient_email: Some(TEST_RECIPIENT_EMAIL.to_string()),
            warning_90_days: false,
            warning_60_days: false,
            warning_30_days: false,
            ..Default::default()
        },
    )
    .await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    // One expired, one critical; only the expired one may alert
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() - Duration::days(10),
        LicenseState::Active,
    )
    .await?;
    let other_type = factory::insert_license_type(&test.db, "First Aid / CPR").await?;
    factory::insert_license(
        &test.db,
        worker.id,
        other_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    let mock = test
        .server
        .mock("POST", "/emails")
        .with_status(200)
        .with_body("{\"id\":\"1\"}")
        .expect(1)
        .create_async()
        .await;

    let notifier = email_notifier(&test.server.url());
    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    mock.assert_async().await;
    assert_eq!(report.checked, 2);
    assert_eq!(report.alerts_sent, 1);

    Ok(())
}

/// Expect replaced and far-future licenses to stay out of the sweep entirely
#[tokio::test]
async fn replaced_and_distant_licenses_are_not_checked() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;

    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Replaced,
    )
    .await?;
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(200),
        LicenseState::Active,
    )
    .await?;

    let notifier = Notifier::disabled();
    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    assert_eq!(report.checked, 0);
    assert_eq!(report.alerts_sent, 0);

    Ok(())
}

/// Expect email enabled without a configured client to log a failure row
#[tokio::test]
async fn missing_email_client_is_recorded_as_error() -> Result<(), TestError> {
    let test = test_setup_with_all_tables!()?;
    factory::insert_alert_settings(&test.db, email_settings()).await?;

    let worker = factory::insert_worker(&test.db, "Dana", "Ironside").await?;
    let license_type = factory::insert_license_type(&test.db, "Working at Heights").await?;
    factory::insert_license(
        &test.db,
        worker.id,
        license_type.id,
        Utc::now().date_naive() + Duration::days(25),
        LicenseState::Active,
    )
    .await?;

    let notifier = Notifier::disabled();
    let report = AlertService::new(&test.db, &notifier)
        .run_expiry_sweep()
        .await
        .expect("sweep");

    assert_eq!(report.checked, 1);
    assert_eq!(report.alerts_sent, 0);
    assert_eq!(report.errors, 1);

    let logs = entity::prelude::AlertLog::find().all(&test.db).await?;
    assert_eq!(logs.len(), 1);
    assert!(!logs[0].success);

    Ok(())
}
