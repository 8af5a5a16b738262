//! Map page route handler.
//!
//! Serves the embedded map editor HTML.

use axum::response::{Html, IntoResponse};

const MAP_HTML: &str = include_str!("../../assets/map.html");

/// GET / - Serve the map editor.
pub async fn index() -> impl IntoResponse {
    Html(MAP_HTML)
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
