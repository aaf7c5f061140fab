use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        setting::{AlertSettingDto, UpdateAlertSettingDto},
    },
    server::{error::Error, model::app::AppState, service::setting::SettingService},
};

pub static SETTING_TAG: &str = "setting";

/// Get the alert settings, creating the default row on first read
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = SETTING_TAG,
    responses(
        (status = 200, description = "Success when retrieving settings", body = AlertSettingDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let settings = SettingService::new(&state.db).get_or_create().await?;

    Ok(Json(AlertSettingDto::from(settings)))
}

/// Update the alert settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = SETTING_TAG,
    responses(
        (status = 200, description = "Settings updated", body = AlertSettingDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(data): Json<UpdateAlertSettingDto>,
) -> Result<impl IntoResponse, Error> {
    let settings = SettingService::new(&state.db).update(&data).await?;

    Ok(Json(AlertSettingDto::from(settings)))
}
