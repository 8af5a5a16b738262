//! Spatial Web Server
//!
//! Axum-based REST API over stored features, plus the map editor page.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use spatial_db::DbPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::map::index))
        .route("/health", get(routes::map::health))
        .route(
            "/Spatial",
            get(routes::spatial::list).post(routes::spatial::add),
        )
        .route("/Spatial/range", post(routes::spatial::add_range))
        .route(
            "/Spatial/{id}",
            get(routes::spatial::get)
                .put(routes::spatial::update)
                .delete(routes::spatial::delete),
        )
        .route("/Spatial/{start_id}/{end_id}", get(routes::spatial::between))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(db: Arc<DbPool>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let pool = spatial_db::init_memory_pool().await.unwrap();
        create_router(AppState::new(Arc::new(pool)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/Spatial",
            Some(json!({"name": "A", "wkt": "POINT(30 10)"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["wkt"], "POINT(30 10)");
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, Method::GET, &format!("/Spatial/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "A");
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/Spatial",
            Some(json!({"name": "B", "wkt": "POINT(30)"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid geometry"));
    }

    #[tokio::test]
    async fn test_missing_feature_is_not_found() {
        let app = app().await;

        let (status, _) = send(&app, Method::GET, "/Spatial/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/Spatial/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/Spatial/7",
            Some(json!({"name": "A", "wkt": "POINT(1 2)"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_enveloped() {
        let app = app().await;

        for (method, uri) in [
            (Method::GET, "/Spatial/abc"),
            (Method::DELETE, "/Spatial/abc"),
            (Method::GET, "/Spatial/1/x"),
        ] {
            let (status, body) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["success"], false, "{}", uri);
            assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
        }

        let (status, body) = send(
            &app,
            Method::PUT,
            "/Spatial/abc",
            Some(json!({"name": "A", "wkt": "POINT(1 2)"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_range_reports_failures() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/Spatial/range",
            Some(json!([
                {"name": "A", "wkt": "POINT(1 2)"},
                {"name": "", "wkt": "POINT(1 2)"},
                {"Name": "C", "WKT": "GARBAGE"}
            ])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let indexes: Vec<i64> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["index"].as_i64().unwrap())
            .collect();
        assert_eq!(indexes, vec![1, 2]);

        let (_, body) = send(&app, Method::GET, "/Spatial", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_update_delete_and_between() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/Spatial/range",
            Some(json!([
                {"name": "A", "wkt": "POINT(1 2)"},
                {"name": "B", "wkt": "LINESTRING(0 0, 1 1)"},
                {"name": "C", "wkt": "POLYGON((0 0, 1 0, 1 1, 0 0))"}
            ])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_i64().unwrap())
            .collect();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/Spatial/{}", ids[0]),
            Some(json!({"name": "A2", "wkt": "point(5 6)"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["wkt"], "POINT(5 6)");

        let (status, body) = send(&app, Method::DELETE, &format!("/Spatial/{}", ids[1]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "B");

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/Spatial/{}/{}", ids[0], ids[2]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A2", "C"]);
    }

    #[tokio::test]
    async fn test_map_page() {
        let app = app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/Spatial"));
    }
}
