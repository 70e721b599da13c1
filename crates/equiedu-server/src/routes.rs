// ABOUTME: Route definitions for the equiedu HTTP server.
// ABOUTME: Assembles the JSON API, the HTMX web form, and the health check into one Axum Router.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::web;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(web::index))
        .route("/web/learn", post(web::learn))
        .route("/web/history", get(web::history))
        .route("/api/learn", post(api::learn::learn))
        .route("/api/history", get(api::history::list_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
