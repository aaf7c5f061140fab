use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LicenseTypeDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateLicenseTypeDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LicenseDto {
    pub id: i32,
    pub worker_id: i32,
    pub license_type_id: i32,
    pub code: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    /// Lifecycle state, either `active` or `replaced`
    pub state: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::license_type::Model> for LicenseTypeDto {
    fn from(model: entity::license_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<entity::license::Model> for LicenseDto {
    fn from(model: entity::license::Model) -> Self {
        Self {
            id: model.id,
            worker_id: model.worker_id,
            license_type_id: model.license_type_id,
            code: model.code,
            issue_date: model.issue_date,
            expiry_date: model.expiry_date,
            state: model.state.to_value(),
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LicenseWithTypeDto {
    #[serde(flatten)]
    pub license: LicenseDto,
    pub license_type: LicenseTypeDto,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LicenseWithWorkerDto {
    #[serde(flatten)]
    pub license: LicenseDto,
    pub license_type: LicenseTypeDto,
    pub worker: WorkerSummaryDto,
}

/// Contact-level worker fields attached to license rows in list views
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WorkerSummaryDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
}

impl From<entity::worker::Model> for WorkerSummaryDto {
    fn from(model: entity::worker::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            position: model.position,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateLicenseDto {
    pub worker_id: i32,
    pub license_type_id: i32,
    pub code: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateLicenseDto {
    pub license_type_id: i32,
    pub code: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub notes: Option<String>,
}

/// Urgency classification of a single license expiry date
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusInfoDto {
    pub status: String,
    pub days_until: i64,
    pub label: String,
}

/// A required license type a worker holds no active license for
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MissingLicenseDto {
    pub license_type_id: i32,
    pub license_type_name: String,
    pub worker: WorkerSummaryDto,
}
