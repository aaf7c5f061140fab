use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        alert::{AlertLogDto, SweepReportDto},
        api::ErrorDto,
    },
    server::{
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::alert::AlertService,
    },
};

pub static ALERT_TAG: &str = "alert";

/// Run the expiry sweep now.
///
/// Guarded by the cron secret when one is configured; internal callers (the
/// settings page's manual trigger) bypass the check with the internal-call
/// header. Without a configured secret the endpoint is open.
#[utoipa::path(
    post,
    path = "/api/alerts/check",
    tag = ALERT_TAG,
    responses(
        (status = 200, description = "Sweep completed", body = SweepReportDto),
        (status = 401, description = "Missing or wrong cron secret", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_alerts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let is_internal_call = headers
        .get("x-internal-call")
        .and_then(|value| value.to_str().ok())
        == Some("true");

    if !is_internal_call {
        if let Some(secret) = &state.config.cron_secret {
            let expected = format!("Bearer {secret}");
            let authorized = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                == Some(expected.as_str());

            if !authorized {
                return Err(AuthError::Unauthorized.into());
            }
        }
    }

    let report = AlertService::new(&state.db, &state.notifier)
        .run_expiry_sweep()
        .await?;

    Ok(Json(report))
}

/// List the most recent alert log entries, newest first
#[utoipa::path(
    get,
    path = "/api/alerts/logs",
    tag = ALERT_TAG,
    responses(
        (status = 200, description = "Success when listing alert logs", body = Vec<AlertLogDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_alert_logs(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let logs = AlertService::new(&state.db, &state.notifier)
        .recent_logs()
        .await?;

    Ok(Json(logs))
}
