#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub message: String,
}

pub type GenerateResponse = easel_core::response::ApiResponse<JobAccepted, StatusResponse>;

/// Runtime configuration as resolved at startup. The key itself is never
/// echoed back, only whether one is set.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct RuntimeConfig {
    pub api_port: u16,
    pub static_server_base: String,
    pub webhook_url: String,
    pub secured: bool,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default = "default_image_number")]
    pub image_number: u8,
}

fn default_image_number() -> u8 {
    1
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct JobAccepted {
    pub job_id: uuid::Uuid,
    /// Where the artifacts of this job will be published.
    pub artifact_base: String,
}
