use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors from the outbound email/SMS channel clients.
///
/// During an expiry sweep these are caught per channel and recorded on the
/// alert log row; they only surface as HTTP responses from the login flow.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{service} API returned status {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
