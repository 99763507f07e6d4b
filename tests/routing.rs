//! Router behavior: static uploads ahead of application delegation.

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use site_server::http::build_router;
use tower::ServiceExt;

mod common;

use common::MockApp;

#[tokio::test]
async fn missing_upload_is_not_delegated() {
    let uploads = tempfile::tempdir().unwrap();
    let app = MockApp::new();
    let router = build_router(uploads.path(), Arc::new(app.clone()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/uploads/x.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.handle_count(), 0);
}

#[tokio::test]
async fn existing_upload_is_served() {
    let uploads = tempfile::tempdir().unwrap();
    fs::write(uploads.path().join("x.png"), b"png-bytes").unwrap();
    let app = MockApp::new();
    let router = build_router(uploads.path(), Arc::new(app.clone()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/uploads/x.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"png-bytes");
    assert_eq!(app.handle_count(), 0);
}

#[tokio::test]
async fn other_requests_are_delegated_verbatim() {
    let uploads = tempfile::tempdir().unwrap();
    let app = MockApp::new();
    let router = build_router(uploads.path(), Arc::new(app.clone()));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/anything-else")
                .body(Body::from("payload"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"app: POST /anything-else [payload]");
    assert_eq!(app.handle_count(), 1);
}

#[tokio::test]
async fn root_path_is_delegated() {
    let uploads = tempfile::tempdir().unwrap();
    let app = MockApp::new();
    let router = build_router(uploads.path(), Arc::new(app.clone()));

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"app: GET / []");
}
