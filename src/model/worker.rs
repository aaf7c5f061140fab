use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::license::{LicenseTypeDto, LicenseWithTypeDto, StatusInfoDto};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkerDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::worker::Model> for WorkerDto {
    fn from(model: entity::worker::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            position: model.position,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkerWithLicensesDto {
    #[serde(flatten)]
    pub worker: WorkerDto,
    pub licenses: Vec<LicenseWithTypeDto>,
    /// Most urgent classification across the worker's active licenses
    pub worst_status: Option<StatusInfoDto>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateWorkerDto {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RequiredLicenseTypeDto {
    pub id: i32,
    pub worker_id: i32,
    pub license_type_id: i32,
    pub license_type: LicenseTypeDto,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetRequiredLicenseTypesDto {
    pub license_type_ids: Vec<i32>,
}
