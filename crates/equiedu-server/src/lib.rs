// ABOUTME: HTTP server for equiedu, providing a JSON API and a browser learning form.
// ABOUTME: Uses Axum with a shared orchestrator, startup configuration, and in-memory session history.

pub mod api;
pub mod app_state;
pub mod config;
pub mod history;
pub mod routes;
pub mod web;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, EquiConfig};
pub use routes::create_router;
