use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        auth::{SendCodeDto, SendCodeResponseDto, VerifyCodeDto},
    },
    server::{
        controller::util::client_addr, error::Error, model::app::AppState,
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Send a login code to the selected admin role's phone
#[utoipa::path(
    post,
    path = "/api/auth/send-code",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Code sent", body = SendCodeResponseDto),
        (status = 400, description = "Invalid role selected", body = ErrorDto),
        (status = 429, description = "Too many code sends from this address", body = ErrorDto),
        (status = 500, description = "SMS service not configured", body = ErrorDto)
    ),
)]
pub async fn send_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(data): Json<SendCodeDto>,
) -> Result<impl IntoResponse, Error> {
    let source_addr = client_addr(&headers);

    let auth_service = AuthService::new(&state.config, &state.notifier, &state.rate_limiter);
    let role_label = auth_service.send_code(&data.role, &source_addr).await?;

    Ok(Json(SendCodeResponseDto {
        success: true,
        role_label,
    }))
}

/// Verify a login code and establish a session
#[utoipa::path(
    post,
    path = "/api/auth/verify-code",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Code verified, session established", body = SuccessDto),
        (status = 400, description = "Missing role or code", body = ErrorDto),
        (status = 401, description = "Invalid or expired verification code", body = ErrorDto),
        (status = 429, description = "Too many verification attempts from this address", body = ErrorDto),
        (status = 500, description = "SMS service not configured", body = ErrorDto)
    ),
)]
pub async fn verify_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(data): Json<VerifyCodeDto>,
) -> Result<impl IntoResponse, Error> {
    let source_addr = client_addr(&headers);

    let auth_service = AuthService::new(&state.config, &state.notifier, &state.rate_limiter);
    auth_service
        .verify_code(&data.role, &data.code, &source_addr, &session)
        .await?;

    Ok(Json(SuccessDto { success: true }))
}
