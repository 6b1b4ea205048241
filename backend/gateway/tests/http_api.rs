//! End-to-end tests for the gateway routes, driven through `Router::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use leafscan_core::{Label, TextAnnotation, VisionAnnotations};
use leafscan_gateway::{build_router, GatewayState};
use leafscan_media::UploadPolicy;
use leafscan_understanding::StaticVisionProvider;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

const BOUNDARY: &str = "leafscan-test-boundary";
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn app_with(provider: StaticVisionProvider) -> Router {
    build_router(GatewayState::new(Arc::new(provider)))
}

fn multipart_body(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"leaf.jpg\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze-leaf")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = app_with(StaticVisionProvider::with_labels(vec![]));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Leaf Analyzer Backend is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn healthy_leaf_upload() {
    let provider = StaticVisionProvider::with_labels(vec![
        Label::new("Green Leaf", 0.92),
        Label::new("Soil", 0.3),
    ]);
    let response = app_with(provider)
        .oneshot(upload_request(multipart_body("image", "image/jpeg", JPEG)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["healthStatus"], "Healthy");
    assert_eq!(body["analysis"]["confidence"], 92);
    assert_eq!(body["analysis"]["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(body["analysis"]["detectedLabels"][0]["name"], "Green Leaf");
    assert_eq!(body["analysis"]["detectedLabels"][0]["confidence"], 92);
    assert!(body["analysis"]["analysisDate"].is_string());
    assert_eq!(body["rawData"]["labels"].as_array().unwrap().len(), 2);
    assert_eq!(body["rawData"]["textDetected"], false);
}

#[tokio::test]
async fn unknown_verdict_is_still_success() {
    let provider = StaticVisionProvider::new(VisionAnnotations {
        labels: vec![Label::unscored("Car"), Label::unscored("Road")],
        text: vec![TextAnnotation { description: "STOP".into(), locale: None }],
    });
    let response = app_with(provider)
        .oneshot(upload_request(multipart_body("image", "image/jpeg", JPEG)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    assert_eq!(body["analysis"]["healthStatus"], "Unknown");
    assert_eq!(body["analysis"]["confidence"], 0);
    assert!(body["analysis"]["detectedLabels"].as_array().unwrap().is_empty());
    assert!(body["analysis"]["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["rawData"]["textDetected"], true);
}

#[tokio::test]
async fn raw_labels_are_capped_at_ten() {
    let labels = (0..12).map(|i| Label::new(format!("Leaf {i}"), 0.5)).collect();
    let response = app_with(StaticVisionProvider::with_labels(labels))
        .oneshot(upload_request(multipart_body("image", "image/jpeg", JPEG)))
        .await
        .unwrap();

    let body = json_response(response).await;
    assert_eq!(body["rawData"]["labels"].as_array().unwrap().len(), 10);
    assert_eq!(body["analysis"]["detectedLabels"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let response = app_with(StaticVisionProvider::with_labels(vec![]))
        .oneshot(upload_request(multipart_body("photo", "image/jpeg", JPEG)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No image file provided");
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze-leaf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app_with(StaticVisionProvider::with_labels(vec![]))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_response(response).await["error"], "No image file provided");
}

#[tokio::test]
async fn non_image_upload_is_unsupported() {
    let response = app_with(StaticVisionProvider::with_labels(vec![]))
        .oneshot(upload_request(multipart_body("image", "text/plain", b"hello")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_response(response).await["error"], "Only image files are allowed!");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let state = GatewayState::new(Arc::new(StaticVisionProvider::with_labels(vec![])))
        .with_upload_policy(UploadPolicy::new(16));
    let response = build_router(state)
        .oneshot(upload_request(multipart_body("image", "image/jpeg", &[0xFF; 64])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_response(response).await["error"],
        "File too large. Maximum size is 16 bytes."
    );
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let response = app_with(StaticVisionProvider::failing("quota exceeded"))
        .oneshot(upload_request(multipart_body("image", "image/jpeg", JPEG)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Failed to analyze image");
    assert_eq!(body["message"], "quota exceeded");
}

#[tokio::test]
async fn malformed_provider_labels_are_a_bad_gateway() {
    let provider = StaticVisionProvider::with_labels(vec![Label::unscored("Leaf")]);
    let response = app_with(provider)
        .oneshot(upload_request(multipart_body("image", "image/jpeg", JPEG)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Vision provider returned malformed labels");
    assert!(body["message"].as_str().unwrap().contains("score is missing"));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let response = app_with(StaticVisionProvider::with_labels(vec![]))
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_response(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn wrong_method_on_known_route_is_json_404() {
    for (method, uri) in [("GET", "/analyze-leaf"), ("POST", "/health")] {
        let response = app_with(StaticVisionProvider::with_labels(vec![]))
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body = json_response(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Endpoint not found");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:8100")
        .body(Body::empty())
        .unwrap();
    let response = app_with(StaticVisionProvider::with_labels(vec![]))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
