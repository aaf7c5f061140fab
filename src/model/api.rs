use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response for operations that only report whether they succeeded
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessDto {
    pub success: bool,
}
