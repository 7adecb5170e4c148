pub use easel_core::auth::key_auth_middleware;

use axum::http::StatusCode;
use easel_core::auth::KeyGuard;

use crate::config::app::AppConfig;

/// Header the secured route groups check.
pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Clone)]
pub struct ApiKeyGuard {
    key: Option<String>,
}

impl ApiKeyGuard {
    pub fn from_config(config: &AppConfig) -> Self {
        ApiKeyGuard {
            key: config.api_key.clone(),
        }
    }
}

impl KeyGuard for ApiKeyGuard {
    fn header_name(&self) -> &'static str {
        API_KEY_HEADER
    }

    fn verify(&self, presented: Option<&str>) -> Result<(), StatusCode> {
        match &self.key {
            // No key configured: the secured groups are open.
            None => Ok(()),
            Some(expected) if presented == Some(expected.as_str()) => Ok(()),
            Some(_) => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
