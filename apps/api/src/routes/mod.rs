pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/templates", get(generation::handle_list_templates))
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        // Rendering and export
        .route("/api/v1/render/preview", post(export::handle_preview))
        .route("/api/v1/export/text", post(export::handle_export_text))
        .route("/api/v1/export/html", post(export::handle_export_html))
        .route("/api/v1/export/pdf", post(export::handle_export_pdf))
        .route("/api/v1/export/print", post(export::handle_print))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::render::pdf::test_support::page_contents;
    use crate::render::WATERMARK_TEXT;

    const RESUME: &str = "Jane Q. Public\njane@example.com\n\nEXPERIENCE\n- Led a team\n- Shipped v2";

    async fn post_json(uri: &str, body: Value) -> Response {
        build_router(AppState::for_tests())
            .oneshot(
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

    async fn get(uri: &str) -> Response {
        build_router(AppState::for_tests())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> &'a str {
        response.headers().get(name).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["generation_enabled"], false);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = get("/api/v1/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_templates_listed() {
        let json = body_json(get("/api/v1/templates").await).await;
        let templates = json["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0]["id"], "software-engineer");
        assert_eq!(templates[0]["data"]["jobTitle"], "Senior Software Engineer");
    }

    #[tokio::test]
    async fn test_generate_without_api_key_is_configuration_error() {
        let body = json!({
            "form_data": {"name": "Jane", "email": "jane@example.com", "experience": "Acme"}
        });
        let response = post_json("/api/v1/resumes/generate", body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_validates_before_configuration() {
        let body = json!({"formData": {"name": "Jane"}});
        let response = post_json("/api/v1/resumes/generate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_returns_one_node_per_line() {
        let response = post_json(
            "/api/v1/render/preview",
            json!({"text": RESUME, "theme": "creative"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["theme"], "creative");
        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), RESUME.split('\n').count());
        assert_eq!(nodes[3]["kind"], "header");
        assert_eq!(nodes[4]["marker"], "★");
    }

    #[tokio::test]
    async fn test_export_text_headers() {
        let response = post_json("/api/v1/export/text", json!({"text": RESUME})).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header_str(&response, header::CONTENT_DISPOSITION),
            "attachment; filename=\"jane_q_public_resume.txt\""
        );
        assert_eq!(body_bytes(response).await, RESUME.as_bytes());
    }

    #[tokio::test]
    async fn test_export_html_with_watermark() {
        let response = post_json(
            "/api/v1/export/html",
            json!({"text": RESUME, "watermark": true}),
        )
        .await;
        assert!(header_str(&response, header::CONTENT_TYPE).starts_with("text/html"));
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(html.matches(WATERMARK_TEXT).count(), 1);
        assert_eq!(html.matches("<ul").count(), 1);
    }

    #[tokio::test]
    async fn test_export_pdf() {
        let response = post_json(
            "/api/v1/export/pdf",
            json!({"text": RESUME, "watermark": true}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CONTENT_TYPE), "application/pdf");
        assert_eq!(
            header_str(&response, header::CONTENT_DISPOSITION),
            "attachment; filename=\"jane_q_public_resume.pdf\""
        );
        let pages = page_contents(&body_bytes(response).await);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].matches(WATERMARK_TEXT).count(), 1);
    }

    #[tokio::test]
    async fn test_print_is_inline() {
        let response = post_json("/api/v1/export/print", json!({"text": ""})).await;
        assert_eq!(
            header_str(&response, header::CONTENT_DISPOSITION),
            "inline; filename=\"resume.html\""
        );
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("window.print()"));
    }
}
