use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Errors raised by worker, license, and license type management.
///
/// Duplicate conflicts are reported distinctly from supersession: a caller
/// receiving `DuplicateLicense` knows nothing was written, while an accepted
/// record that lost the supersession decision comes back as a normal created
/// license in the `replaced` state.
#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("This exact \"{0}\" license already exists.")]
    DuplicateLicense(String),
    #[error("Worker {0} not found")]
    WorkerNotFound(i32),
    #[error("License {0} not found")]
    LicenseNotFound(i32),
    #[error("License type {0} not found")]
    LicenseTypeNotFound(i32),
    #[error("A license type with this name already exists")]
    LicenseTypeNameTaken(String),
    #[error("Cannot delete \"{name}\" because it has {count} license(s) associated with it. Remove those licenses first.")]
    LicenseTypeInUse { name: String, count: u64 },
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for LicenseError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::DuplicateLicense(_) | Self::LicenseTypeNameTaken(_) => StatusCode::CONFLICT,
            Self::WorkerNotFound(_) | Self::LicenseNotFound(_) | Self::LicenseTypeNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::LicenseTypeInUse { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,
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
