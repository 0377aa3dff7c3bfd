use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn home_lists_available_routes() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;
    let (status, body) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Welcome to the Hawaii Climate API!"));
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/&lt;start&gt;",
        "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
    ] {
        assert!(html.contains(route), "missing route {route}");
    }
}

#[tokio::test]
async fn docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;
    let (status, _) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
}
