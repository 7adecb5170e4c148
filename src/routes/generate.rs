use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use uuid::Uuid;

use crate::app::response::{GenerateRequest, GenerateResponse, JobAccepted, StatusResponse};
use crate::config::app::AppConfig;

pub fn secured_router() -> Router<Arc<AppConfig>> {
    Router::new().route("/v1/generate", post(submit))
}

/// Accepts a generation request and answers with the job id plus the public
/// base URL its artifacts will be served from. Execution itself belongs to
/// the queue workers behind the webhook.
#[utoipa::path(
    post,
    path = "/v1/generate",
    tag = "Generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Job accepted", body = JobAccepted),
        (status = 400, description = "Empty prompt", body = StatusResponse),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn submit(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<GenerateRequest>,
) -> GenerateResponse {
    if request.prompt.trim().is_empty() {
        return GenerateResponse::BadRequest(StatusResponse {
            message: "prompt must not be empty".into(),
        });
    }

    let job_id = Uuid::new_v4();

    tracing::info!(
        %job_id,
        image_number = request.image_number,
        prompt_len = request.prompt.len(),
        negative_prompt_len = request.negative_prompt.len(),
        "accepted generation job"
    );

    GenerateResponse::Ok(JobAccepted {
        artifact_base: format!("{}/outputs/{job_id}", config.static_server_base),
        job_id,
    })
}
