use utoipa::OpenApi;

use crate::app::response::{GenerateRequest, JobAccepted, RuntimeConfig, StatusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::query::ping,
        crate::routes::query::runtime_config,
        crate::routes::generate::submit,
    ),
    components(schemas(StatusResponse, RuntimeConfig, GenerateRequest, JobAccepted)),
    info(description = "easel API")
)]
pub struct ApiDoc;
