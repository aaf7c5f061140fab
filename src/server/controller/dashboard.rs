use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, stats::DashboardStatsDto},
    server::{error::Error, model::app::AppState, service::stats::StatsService},
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Get dashboard totals and per-bucket license counts
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Success when building dashboard stats", body = DashboardStatsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let stats = StatsService::new(&state.db).get_stats().await?;

    Ok(Json(stats))
}
