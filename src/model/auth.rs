use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SendCodeDto {
    /// Admin role requesting a login code, either `web` or `office`
    pub role: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SendCodeResponseDto {
    pub success: bool,
    pub role_label: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyCodeDto {
    pub role: String,
    pub code: String,
}
