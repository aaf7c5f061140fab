use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Too many requests. Try again in {retry_after_seconds} seconds.")]
    RateLimited { retry_after_seconds: u64 },
    #[error("Invalid role selected")]
    InvalidRole,
    #[error("Role and code are required")]
    MissingCredentials,
    #[error("Invalid or expired verification code")]
    CodeRejected,
    /// Raised loudly when the login flow is used without SMS provider
    /// credentials; unlike expiry alerts this must not degrade silently.
    #[error("SMS service not configured")]
    SmsNotConfigured,
    #[error("Unauthorized")]
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidRole | Self::MissingCredentials => StatusCode::BAD_REQUEST,
            Self::CodeRejected => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::SmsNotConfigured => return InternalServerError(self).into_response(),
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
