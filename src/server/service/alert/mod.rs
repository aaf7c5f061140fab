//! Expiry alerting: classification of active licenses into alert levels and
//! deduplicated dispatch over the configured channels.
//!
//! The sweep is a batch pass over active licenses inside the 90-day horizon.
//! Alert state is keyed by (license, level): moving into a more urgent bucket
//! alerts again, sitting in the same bucket re-alerts only after the dedup
//! window lapses. Dispatch decisions read the alert log as of sweep start, so
//! two overlapping sweeps can in principle both pass the suppression check;
//! that race is accepted as rare and bounded to one duplicate send.

pub mod message;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use entity::alert_log::{AlertChannel, AlertLevel};

use crate::{
    model::alert::{AlertLogDto, SweepReportDto},
    server::{
        data::{
            alert_log::AlertLogRepository, alert_setting::AlertSettingRepository,
            license::LicenseRepository,
        },
        error::{notify::NotifyError, Error},
        notify::Notifier,
        service::license::status::{self, LicenseStatus},
    },
};

/// Days before expiry at which a license enters the sweep's working set
const SWEEP_HORIZON_DAYS: i64 = 90;
/// Rolling window within which a successful alert suppresses re-sending
const DEDUP_WINDOW_DAYS: i64 = 7;
/// Rows returned by the alert history view
const LOG_HISTORY_LIMIT: u64 = 50;

pub struct AlertService<'a> {
    db: &'a DatabaseConnection,
    notifier: &'a Notifier,
}

impl<'a> AlertService<'a> {
    /// Creates a new instance of [`AlertService`]
    pub fn new(db: &'a DatabaseConnection, notifier: &'a Notifier) -> Self {
        Self { db, notifier }
    }

    /// Sweeps all active licenses expiring within the horizon and dispatches
    /// due alerts.
    ///
    /// Safe to call with no arguments and safe to re-run: a successful alert
    /// for the same (license, level) within the dedup window suppresses
    /// another send. Missing settings or disabled channels short-circuit to
    /// an empty report instead of failing.
    pub async fn run_expiry_sweep(&self) -> Result<SweepReportDto, Error> {
        self.sweep_at(Utc::now()).await
    }

    /// Runs the sweep against an explicit clock reading
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<SweepReportDto, Error> {
        let settings = match AlertSettingRepository::new(self.db).get().await? {
            Some(settings) => settings,
            None => return Ok(empty_report("No alert settings found")),
        };

        if !settings.email_enabled && !settings.sms_enabled {
            return Ok(empty_report("All notifications disabled"));
        }

        let today = now.date_naive();
        let cutoff = today + Duration::days(SWEEP_HORIZON_DAYS);
        let dedup_since = now.naive_utc() - Duration::days(DEDUP_WINDOW_DAYS);

        let licenses = LicenseRepository::new(self.db)
            .get_active_expiring_before(cutoff)
            .await?;
        let alert_log_repository = AlertLogRepository::new(self.db);

        let checked = licenses.len() as u64;
        let mut alerts_sent: u64 = 0;
        let mut errors: u64 = 0;

        for (license, license_type, worker) in licenses {
            let info = status::classify(license.expiry_date, today);

            let Some(level) = alert_level_for(info.status, &settings) else {
                continue;
            };

            if alert_log_repository
                .has_recent_success(license.id, level, dedup_since)
                .await?
            {
                continue;
            }

            let (Some(license_type), Some(worker)) = (license_type, worker) else {
                continue;
            };
            let worker_name = format!("{} {}", worker.first_name, worker.last_name);

            if settings.email_enabled {
                if let Some(recipient) = settings.recipient_email.as_deref() {
                    let subject = message::email_subject(
                        &worker_name,
                        &license_type.name,
                        license.code.as_deref(),
                        &level,
                    );
                    let body = message::email_body(
                        &worker_name,
                        &license_type.name,
                        license.code.as_deref(),
                        license.expiry_date,
                        &level,
                    );

                    let result = match &self.notifier.email {
                        Some(client) => client.send(recipient, &subject, &body).await,
                        None => Err(NotifyError::NotConfigured("Email API key")),
                    };

                    match result {
                        Ok(()) => {
                            alert_log_repository
                                .create(
                                    license.id,
                                    AlertChannel::Email,
                                    level,
                                    true,
                                    None,
                                    now.naive_utc(),
                                )
                                .await?;
                            alerts_sent += 1;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Email alert failed for license {}: {}",
                                license.id,
                                e
                            );
                            alert_log_repository
                                .create(
                                    license.id,
                                    AlertChannel::Email,
                                    level,
                                    false,
                                    Some(e.to_string()),
                                    now.naive_utc(),
                                )
                                .await?;
                            errors += 1;
                        }
                    }
                }
            }

            if settings.sms_enabled {
                if let Some(recipient) = settings.recipient_phone.as_deref() {
                    let body = message::sms_body(
                        &worker_name,
                        &license_type.name,
                        license.expiry_date,
                        &level,
                    );

                    let result = match &self.notifier.sms {
                        Some(client) => client.send_message(recipient, &body).await,
                        None => Err(NotifyError::NotConfigured("SMS credentials")),
                    };

                    match result {
                        Ok(()) => {
                            alert_log_repository
                                .create(
                                    license.id,
                                    AlertChannel::Sms,
                                    level,
                                    true,
                                    None,
                                    now.naive_utc(),
                                )
                                .await?;
                            alerts_sent += 1;
                        }
                        Err(e) => {
                            tracing::warn!("SMS alert failed for license {}: {}", license.id, e);
                            alert_log_repository
                                .create(
                                    license.id,
                                    AlertChannel::Sms,
                                    level,
                                    false,
                                    Some(e.to_string()),
                                    now.naive_utc(),
                                )
                                .await?;
                            errors += 1;
                        }
                    }
                }
            }
        }

        Ok(SweepReportDto {
            checked,
            alerts_sent,
            errors,
            message: "Check complete".to_string(),
        })
    }

    /// Gets the most recent alert log rows enriched with license type and
    /// worker names for the audit history view
    pub async fn recent_logs(&self) -> Result<Vec<AlertLogDto>, Error> {
        let logs = AlertLogRepository::new(self.db)
            .get_recent(LOG_HISTORY_LIMIT)
            .await?;

        let type_ids: Vec<i32> = logs
            .iter()
            .filter_map(|(_, license)| license.as_ref().map(|l| l.license_type_id))
            .collect();
        let worker_ids: Vec<i32> = logs
            .iter()
            .filter_map(|(_, license)| license.as_ref().map(|l| l.worker_id))
            .collect();

        let license_types: HashMap<i32, entity::license_type::Model> = if type_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::LicenseType::find()
                .filter(entity::license_type::Column::Id.is_in(type_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };

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

        Ok(logs
            .into_iter()
            .map(|(log, license)| {
                let license_type_name = license
                    .as_ref()
                    .and_then(|l| license_types.get(&l.license_type_id))
                    .map(|t| t.name.clone());
                let worker_name = license
                    .as_ref()
                    .and_then(|l| workers.get(&l.worker_id))
                    .map(|w| format!("{} {}", w.first_name, w.last_name));

                AlertLogDto {
                    id: log.id,
                    license_id: log.license_id,
                    channel: log.channel.to_value(),
                    level: log.level.to_value(),
                    success: log.success,
                    error: log.error,
                    sent_at: log.sent_at,
                    license_type_name,
                    worker_name,
                }
            })
            .collect())
    }
}

/// Maps an urgency bucket to the alert level due for it, honoring the
/// per-threshold enable flags. Expired licenses always alert.
pub fn alert_level_for(
    status: LicenseStatus,
    settings: &entity::alert_setting::Model,
) -> Option<AlertLevel> {
    match status {
        LicenseStatus::Expired => Some(AlertLevel::Expired),
        LicenseStatus::Critical if settings.warning_30_days => Some(AlertLevel::Days30),
        LicenseStatus::Warning if settings.warning_60_days => Some(AlertLevel::Days60),
        LicenseStatus::Caution if settings.warning_90_days => Some(AlertLevel::Days90),
        _ => None,
    }
}

fn empty_report(message: &str) -> SweepReportDto {
    SweepReportDto {
        checked: 0,
        alerts_sent: 0,
        errors: 0,
        message: message.to_string(),
    }
}
