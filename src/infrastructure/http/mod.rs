//! HTTP REST API routes

mod adventure_routes;
mod export_routes;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Generation routes
        .route(
            "/v1/adventure/outline",
            post(adventure_routes::generate_outline),
        )
        .route(
            "/v1/adventure/scene-guide",
            post(adventure_routes::generate_scene_guide),
        )
        .route("/v1/adventure/lint", post(adventure_routes::lint))
        // Export routes
        .route(
            "/v1/adventure/export/markdown",
            post(export_routes::export_markdown),
        )
        .route(
            "/v1/adventure/export/scene-guide/markdown",
            post(export_routes::export_scene_guide_markdown),
        )
        .route("/v1/adventure/export/json", post(export_routes::export_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::adventure_routes::CONTENT_SOURCE_HEADER;
    use crate::application::ports::outbound::{LlmError, LlmPort};
    use crate::application::services::adventure_service::tests::QueueLlm;
    use crate::domain::entities::{OutlineRequest, OutlineResponse};
    use crate::domain::services::{demo_outline_response, demo_scene_guide};
    use crate::infrastructure::config::AppConfig;

    fn app(config: AppConfig, llm: Option<QueueLlm>) -> Router {
        let llm = llm.map(|l| Arc::new(l) as Arc<dyn LlmPort>);
        let state = AppState::new(config).with_llm(llm);
        create_routes().with_state(Arc::new(state))
    }

    fn no_fallback() -> AppConfig {
        AppConfig {
            demo_fallback: false,
            ..AppConfig::default()
        }
    }

    fn request() -> OutlineRequest {
        OutlineRequest::new("A cursed lighthouse traps sailors in a time loop").with_levels(1, 3)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_outline_without_backend_serves_demo() {
        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/outline",
            json!(request()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&CONTENT_SOURCE_HEADER], "demo");
        let result: OutlineResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(result, demo_outline_response(&request()));
    }

    #[tokio::test]
    async fn test_outline_from_model() {
        let fixture = demo_outline_response(&request());
        let llm = QueueLlm::new(vec![
            Ok(serde_json::to_string(&fixture.outline).unwrap()),
            Ok(serde_json::to_string(&fixture.detailed).unwrap()),
        ]);

        let response = post_json(
            app(AppConfig::default(), Some(llm)),
            "/v1/adventure/outline",
            json!(request()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&CONTENT_SOURCE_HEADER], "model");
    }

    #[tokio::test]
    async fn test_outline_invalid_request_is_422() {
        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/outline",
            json!({"concept": "short"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_outline_missing_credentials_is_500() {
        let response = post_json(
            app(no_fallback(), None),
            "/v1/adventure/outline",
            json!(request()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("credential"));
    }

    #[tokio::test]
    async fn test_outline_transport_failure_is_500() {
        let llm = QueueLlm::new(vec![Err(LlmError::RequestFailed(
            "connection refused".to_string(),
        ))]);
        let response = post_json(
            app(AppConfig::default(), Some(llm)),
            "/v1/adventure/outline",
            json!(request()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_scene_guide() {
        let result = demo_outline_response(&request());
        let body = json!({"request": request(), "result": result, "scene_id": "S2"});

        let response = post_json(app(AppConfig::default(), None), "/v1/adventure/scene-guide", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let guide: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(guide["scene_id"], "S2");
        assert_eq!(guide["location_steps"][0]["step_id"], "S2-L1");

        let body = json!({"request": request(), "result": result, "scene_id": "S9"});
        let response = post_json(app(AppConfig::default(), None), "/v1/adventure/scene-guide", body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lint() {
        let mut result = demo_outline_response(&request());
        let scene = result.detailed.scenes[0].clone();
        let mut guide = demo_scene_guide(&request(), &result.outline, &result.detailed, &scene);
        guide.location_steps.truncate(2);
        result.detailed.scenes[1].links_to_beats.push("B42".to_string());

        let body = json!({"request": request(), "result": result, "guide": guide});
        let response = post_json(app(AppConfig::default(), None), "/v1/adventure/lint", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let lint: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let warnings = lint["warnings"].as_array().unwrap();
        assert!(warnings
            .iter()
            .any(|w| w["message"].as_str().unwrap().contains("B42")));
        assert!(warnings
            .iter()
            .any(|w| w["path"].as_str().unwrap().contains("location_steps")));
    }

    #[tokio::test]
    async fn test_export_markdown() {
        let result = demo_outline_response(&request());
        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/export/markdown",
            json!(result),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/markdown"));
        assert!(body_text(response).await.starts_with("# The Lantern That Remembers"));
    }

    #[tokio::test]
    async fn test_export_scene_guide_markdown() {
        let result = demo_outline_response(&request());
        let scene = &result.detailed.scenes[3];
        let guide = demo_scene_guide(&request(), &result.outline, &result.detailed, scene);

        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/export/scene-guide/markdown",
            json!(guide),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.starts_with("# S4: "));
    }

    #[tokio::test]
    async fn test_export_json_parts() {
        let result = demo_outline_response(&request());

        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/export/json",
            json!(result),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"adventure_outline.json\""
        );
        let full: OutlineResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(full, result);

        let response = post_json(
            app(AppConfig::default(), None),
            "/v1/adventure/export/json?part=outline",
            json!(result),
        )
        .await;
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"adventure_outline_high_level.json\""
        );
        let outline: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(outline["title"], json!(result.outline.title));
        assert!(outline.get("detailed").is_none());
    }
}
