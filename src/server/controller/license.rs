use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        license::{
            CreateLicenseDto, LicenseDto, LicenseTypeDto, LicenseWithWorkerDto, MissingLicenseDto,
            UpdateLicenseDto, WorkerSummaryDto,
        },
    },
    server::{
        data::license::LicenseWithRelated,
        error::Error,
        model::app::AppState,
        service::{license::LicenseService, requirement::RequirementService},
    },
};

pub static LICENSE_TAG: &str = "license";

/// Add a license record.
///
/// An exact duplicate is rejected with a conflict; otherwise the record with
/// the latest expiry date for the (worker, type) pair ends up active and the
/// other replaced.
#[utoipa::path(
    post,
    path = "/api/licenses",
    tag = LICENSE_TAG,
    responses(
        (status = 201, description = "License created", body = LicenseWithWorkerDto),
        (status = 404, description = "Worker or license type not found", body = ErrorDto),
        (status = 409, description = "Exact duplicate license", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_license(
    State(state): State<AppState>,
    Json(data): Json<CreateLicenseDto>,
) -> Result<impl IntoResponse, Error> {
    let license = LicenseService::new(&state.db).add_license(&data).await?;

    Ok((StatusCode::CREATED, Json(license_with_worker(license)?)))
}

/// Get a license with its type and worker
#[utoipa::path(
    get,
    path = "/api/licenses/{id}",
    tag = LICENSE_TAG,
    responses(
        (status = 200, description = "Success when retrieving license", body = LicenseWithWorkerDto),
        (status = 404, description = "License not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_license(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let license = LicenseService::new(&state.db).get_license(id).await?;

    Ok(Json(license_with_worker(license)?))
}

/// Update a license's fields without touching its lifecycle state
#[utoipa::path(
    put,
    path = "/api/licenses/{id}",
    tag = LICENSE_TAG,
    responses(
        (status = 200, description = "License updated", body = LicenseWithWorkerDto),
        (status = 404, description = "License or license type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLicenseDto>,
) -> Result<impl IntoResponse, Error> {
    let license = LicenseService::new(&state.db)
        .update_license(id, &data)
        .await?;

    Ok(Json(license_with_worker(license)?))
}

/// Delete a license and its alert history
#[utoipa::path(
    delete,
    path = "/api/licenses/{id}",
    tag = LICENSE_TAG,
    responses(
        (status = 200, description = "License deleted", body = SuccessDto),
        (status = 404, description = "License not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_license(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    LicenseService::new(&state.db).delete_license(id).await?;

    Ok(Json(SuccessDto { success: true }))
}

/// List required license types no active license covers
#[utoipa::path(
    get,
    path = "/api/licenses/missing",
    tag = LICENSE_TAG,
    responses(
        (status = 200, description = "Success when listing missing licenses", body = Vec<MissingLicenseDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_missing_licenses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let missing = RequirementService::new(&state.db).find_missing().await?;

    Ok(Json(missing))
}

fn license_with_worker(
    (license, license_type, worker): LicenseWithRelated,
) -> Result<LicenseWithWorkerDto, Error> {
    let license_type = license_type.ok_or_else(|| {
        Error::InternalError(format!("License {} has no license type row", license.id))
    })?;
    let worker = worker.ok_or_else(|| {
        Error::InternalError(format!("License {} has no worker row", license.id))
    })?;

    Ok(LicenseWithWorkerDto {
        license: LicenseDto::from(license),
        license_type: LicenseTypeDto::from(license_type),
        worker: WorkerSummaryDto::from(worker),
    })
}
