//! Form page, health and API document integration tests.

mod helpers;

use helpers::setup_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_form_page_falls_back_to_embedded_page() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), 200);
    let page = response.text();
    assert!(page.contains("action=\"/enviar-formulario\""));
    assert!(page.contains("name=\"documentos\""));
}

#[tokio::test]
async fn test_health_reports_upload_dir() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upload_dir"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_submission_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/enviar-formulario"]["post"].is_object());
}

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    let generated = response.header("X-Request-ID");
    assert!(!generated.is_empty());

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "pedido-123")
        .await;
    assert_eq!(response.header("X-Request-ID"), "pedido-123");
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;

    assert_eq!(response.header("X-Content-Type-Options"), "nosniff");
    assert_eq!(response.header("Cache-Control"), "no-store, private");
}
