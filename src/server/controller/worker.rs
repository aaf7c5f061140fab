use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        worker::{
            CreateWorkerDto, RequiredLicenseTypeDto, SetRequiredLicenseTypesDto, WorkerDto,
            WorkerWithLicensesDto,
        },
    },
    server::{error::Error, model::app::AppState, service::worker::WorkerService},
};

pub static WORKER_TAG: &str = "worker";

#[derive(Deserialize, utoipa::IntoParams)]
pub struct WorkerSearchParams {
    /// Case-insensitive substring matched against names and position
    pub q: Option<String>,
}

/// List all workers with their licenses
#[utoipa::path(
    get,
    path = "/api/workers",
    tag = WORKER_TAG,
    params(WorkerSearchParams),
    responses(
        (status = 200, description = "Success when listing workers", body = Vec<WorkerWithLicensesDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_workers(
    State(state): State<AppState>,
    Query(params): Query<WorkerSearchParams>,
) -> Result<impl IntoResponse, Error> {
    let workers = WorkerService::new(&state.db)
        .list_workers(params.q.as_deref())
        .await?;

    Ok(Json(workers))
}

/// Create a worker
#[utoipa::path(
    post,
    path = "/api/workers",
    tag = WORKER_TAG,
    responses(
        (status = 201, description = "Worker created", body = WorkerDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_worker(
    State(state): State<AppState>,
    Json(data): Json<CreateWorkerDto>,
) -> Result<impl IntoResponse, Error> {
    let worker = WorkerService::new(&state.db).create_worker(&data).await?;

    Ok((StatusCode::CREATED, Json(worker)))
}

/// Get a worker with licenses ordered by expiry date
#[utoipa::path(
    get,
    path = "/api/workers/{id}",
    tag = WORKER_TAG,
    responses(
        (status = 200, description = "Success when retrieving worker", body = WorkerWithLicensesDto),
        (status = 404, description = "Worker not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let worker = WorkerService::new(&state.db).get_worker(id).await?;

    Ok(Json(worker))
}

/// Update a worker's contact fields
#[utoipa::path(
    put,
    path = "/api/workers/{id}",
    tag = WORKER_TAG,
    responses(
        (status = 200, description = "Worker updated", body = WorkerDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 404, description = "Worker not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateWorkerDto>,
) -> Result<impl IntoResponse, Error> {
    let worker = WorkerService::new(&state.db).update_worker(id, &data).await?;

    Ok(Json(worker))
}

/// Delete a worker and everything it owns
#[utoipa::path(
    delete,
    path = "/api/workers/{id}",
    tag = WORKER_TAG,
    responses(
        (status = 200, description = "Worker deleted", body = SuccessDto),
        (status = 404, description = "Worker not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    WorkerService::new(&state.db).delete_worker(id).await?;

    Ok(Json(SuccessDto { success: true }))
}

/// Get a worker's required license types
#[utoipa::path(
    get,
    path = "/api/workers/{id}/required-license-types",
    tag = WORKER_TAG,
    responses(
        (status = 200, description = "Success when listing requirements", body = Vec<RequiredLicenseTypeDto>),
        (status = 404, description = "Worker not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_required_license_types(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let requirements = WorkerService::new(&state.db)
        .get_required_license_types(id)
        .await?;

    Ok(Json(requirements))
}

/// Replace a worker's required license types
#[utoipa::path(
    put,
    path = "/api/workers/{id}/required-license-types",
    tag = WORKER_TAG,
    responses(
        (status = 200, description = "Requirements replaced", body = Vec<RequiredLicenseTypeDto>),
        (status = 404, description = "Worker or license type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_required_license_types(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<SetRequiredLicenseTypesDto>,
) -> Result<impl IntoResponse, Error> {
    let requirements = WorkerService::new(&state.db)
        .set_required_license_types(id, &data.license_type_ids)
        .await?;

    Ok(Json(requirements))
}
