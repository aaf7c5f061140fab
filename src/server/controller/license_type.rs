use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        license::{CreateLicenseTypeDto, LicenseTypeDto},
    },
    server::{error::Error, model::app::AppState, service::license_type::LicenseTypeService},
};

pub static LICENSE_TYPE_TAG: &str = "license-type";

/// List all license types
#[utoipa::path(
    get,
    path = "/api/license-types",
    tag = LICENSE_TYPE_TAG,
    responses(
        (status = 200, description = "Success when listing license types", body = Vec<LicenseTypeDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_license_types(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let license_types = LicenseTypeService::new(&state.db).list().await?;

    Ok(Json(
        license_types
            .into_iter()
            .map(LicenseTypeDto::from)
            .collect::<Vec<_>>(),
    ))
}

/// Create a license type; an existing name returns the existing row
#[utoipa::path(
    post,
    path = "/api/license-types",
    tag = LICENSE_TYPE_TAG,
    responses(
        (status = 200, description = "Name already existed, returning existing type", body = LicenseTypeDto),
        (status = 201, description = "License type created", body = LicenseTypeDto),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_license_type(
    State(state): State<AppState>,
    Json(data): Json<CreateLicenseTypeDto>,
) -> Result<impl IntoResponse, Error> {
    let (license_type, created) = LicenseTypeService::new(&state.db)
        .create(&data.name, data.description.as_deref())
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(LicenseTypeDto::from(license_type))))
}

/// Rename a license type
#[utoipa::path(
    put,
    path = "/api/license-types/{id}",
    tag = LICENSE_TYPE_TAG,
    responses(
        (status = 200, description = "License type updated", body = LicenseTypeDto),
        (status = 404, description = "License type not found", body = ErrorDto),
        (status = 409, description = "Name already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_license_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateLicenseTypeDto>,
) -> Result<impl IntoResponse, Error> {
    let license_type = LicenseTypeService::new(&state.db)
        .update(id, &data.name, data.description.as_deref())
        .await?;

    Ok(Json(LicenseTypeDto::from(license_type)))
}

/// Delete a license type with no licenses referencing it
#[utoipa::path(
    delete,
    path = "/api/license-types/{id}",
    tag = LICENSE_TYPE_TAG,
    responses(
        (status = 200, description = "License type deleted", body = SuccessDto),
        (status = 400, description = "License type still referenced", body = ErrorDto),
        (status = 404, description = "License type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_license_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    LicenseTypeService::new(&state.db).delete(id).await?;

    Ok(Json(SuccessDto { success: true }))
}
