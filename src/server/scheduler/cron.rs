use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::server::{notify::Notifier, service::alert::AlertService};

use super::config::EXPIRY_SWEEP_CRON_EXPRESSION;

/// Initialize and start the cron job scheduler
pub async fn start_scheduler(
    db: &DatabaseConnection,
    notifier: &Arc<Notifier>,
) -> Result<(), JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    let db_clone = db.clone();
    let notifier_clone = notifier.clone();

    sched
        .add(Job::new_async(
            EXPIRY_SWEEP_CRON_EXPRESSION,
            move |_, _| {
                let db = db_clone.clone();
                let notifier = notifier_clone.clone();

                Box::pin(async move {
                    let alert_service = AlertService::new(&db, &notifier);

                    match alert_service.run_expiry_sweep().await {
                        Ok(report) => tracing::info!(
                            "Expiry sweep complete: {} checked, {} alert(s) sent, {} error(s)",
                            report.checked,
                            report.alerts_sent,
                            report.errors
                        ),
                        Err(e) => tracing::error!("Error running expiry sweep: {:?}", e),
                    }
                })
            },
        )?)
        .await?;

    sched.start().await?;
    Ok(())
}
