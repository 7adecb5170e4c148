pub mod generate;
pub mod query;

use std::sync::Arc;

use axum::response::Redirect;
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::app::middleware::auth::{ApiKeyGuard, key_auth_middleware};
use crate::config::app::AppConfig;
use crate::docs::ApiDoc;

pub fn routes(config: Arc<AppConfig>) -> Router {
    let guard = ApiKeyGuard::from_config(&config);

    let secured = Router::new()
        .merge(query::secured_router())
        .merge(generate::secured_router())
        .layer(middleware::from_fn(key_auth_middleware::<ApiKeyGuard>))
        .layer(Extension(guard));

    let api = Router::new()
        .merge(secured)
        .merge(query::public_router())
        .with_state(config);

    Router::new()
        .route("/", get(root))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Mirrors the request origin instead of `*` so credentialed
        // browser calls stay allowed.
        .layer(CorsLayer::very_permissive())
}

/// Root endpoint, points callers at the interactive docs.
async fn root() -> Redirect {
    Redirect::to("/docs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::app::middleware::auth::API_KEY_HEADER;

    fn app(api_key: Option<&str>) -> Router {
        routes(Arc::new(AppConfig {
            api_key: api_key.map(String::from),
            webhook_url: "http://hooks.internal/done".into(),
            api_port: 8000,
            static_server_base: "http://example.com:8000".into(),
            listen: "127.0.0.1".into(),
        }))
    }

    fn get_request(path: &str, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn root_redirects_to_docs() {
        let response = app(None).oneshot(get_request("/", None)).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/docs");
    }

    #[tokio::test]
    async fn ping_stays_public_even_with_a_key_configured() {
        let response = app(Some("sk-secret"))
            .oneshot(get_request("/ping", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn secured_group_rejects_missing_or_wrong_key() {
        let missing = app(Some("sk-secret"))
            .oneshot(get_request("/v1/config", None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app(Some("sk-secret"))
            .oneshot(get_request("/v1/config", Some("nope")))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn secured_group_accepts_the_configured_key() {
        let response = app(Some("sk-secret"))
            .oneshot(get_request("/v1/config", Some("sk-secret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let config: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(config["api_port"], 8000);
        assert_eq!(config["secured"], true);
    }

    #[tokio::test]
    async fn secured_group_is_open_without_a_configured_key() {
        let response = app(None)
            .oneshot(get_request("/v1/config", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn generate_roots_artifacts_at_the_static_base() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/generate")
            .header(API_KEY_HEADER, "sk-secret")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"prompt": "a lighthouse at dusk"}"#))
            .unwrap();

        let response = app(Some("sk-secret")).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let job: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let artifact_base = job["artifact_base"].as_str().unwrap();
        assert!(artifact_base.starts_with("http://example.com:8000/outputs/"));
        assert!(artifact_base.ends_with(job["job_id"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn generate_rejects_an_empty_prompt() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"prompt": "  "}"#))
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
