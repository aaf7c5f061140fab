use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AlertLogDto {
    pub id: i32,
    pub license_id: i32,
    /// Dispatch channel, either `email` or `sms`
    pub channel: String,
    /// Alert tier: `expired`, `30_days`, `60_days`, or `90_days`
    pub level: String,
    pub success: bool,
    pub error: Option<String>,
    pub sent_at: NaiveDateTime,
    pub license_type_name: Option<String>,
    pub worker_name: Option<String>,
}

/// Outcome of one expiry sweep over all active licenses
#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SweepReportDto {
    pub checked: u64,
    pub alerts_sent: u64,
    pub errors: u64,
    pub message: String,
}
