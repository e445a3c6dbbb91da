pub mod health;
pub mod page;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .route("/api/v1/extract", post(handlers::handle_extract))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::suggestions::REMOTE_FAILURE_PLACEHOLDER;
    use crate::state::tests::test_state;

    const BOUNDARY: &str = "resume-analyzer-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a [u8]),
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume.pdf\"\r\n\
                             Content-Type: application/pdf\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_page_is_served() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Analyze Match"));
    }

    #[tokio::test]
    async fn test_analyze_text_rule_mode() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({
                "resume_text": "Short resume: Python developer",
                "job_description": "Python developer with SQL skills",
                "use_ai": false
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestion_mode"], "rules");
        assert_eq!(body["matched_skills"], json!(["python"]));
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!(suggestions
            .iter()
            .any(|s| s == "Include your experience with SQL databases."));
        assert!(body.get("suggestion_error").is_none());
    }

    #[tokio::test]
    async fn test_analyze_text_remote_mode_unreachable() {
        let (status, body) = send(json_request(
            "/api/v1/analyze/text",
            json!({
                "resume_text": "Python developer",
                "job_description": "Python developer",
                "use_ai": true
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"], json!([REMOTE_FAILURE_PLACEHOLDER]));
        assert_eq!(body["suggestion_source"], "remote_fallback");
        assert_eq!(body["suggestion_error"], "network");
    }

    #[tokio::test]
    async fn test_analyze_requires_job_description() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[Part::File("resume", b"%PDF-1.4\n...")],
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_requires_resume() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[Part::Text("job_description", "Rust engineer")],
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("resume"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                Part::File("resume", b"This is a .docx pretending to be a PDF"),
                Part::Text("job_description", "Rust engineer"),
                Part::Text("use_ai", "false"),
            ],
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_PDF");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_toggle() {
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                Part::File("resume", b"%PDF-1.4"),
                Part::Text("job_description", "Rust engineer"),
                Part::Text("use_ai", "sometimes"),
            ],
        );
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_requires_file() {
        let request = multipart_request("/api/v1/extract", &[Part::Text("other", "x")]);
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
