use serde::{Deserialize, Serialize};

use crate::model::license::LicenseWithWorkerDto;

/// Aggregate license counts per urgency bucket for the dashboard
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardStatsDto {
    pub total_workers: u64,
    pub total_licenses: u64,
    pub expired: u64,
    pub expiring_30: u64,
    pub expiring_60: u64,
    pub expiring_90: u64,
    pub valid: u64,
    pub licenses: Vec<LicenseWithWorkerDto>,
}
