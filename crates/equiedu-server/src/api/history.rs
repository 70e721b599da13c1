// ABOUTME: Session history API handler returning the most recent learning requests.
// ABOUTME: GET /api/history lists entries newest first.

use axum::Json;
use axum::extract::State;

use crate::app_state::SharedState;
use crate::history::HistoryEntry;

/// GET /api/history - Recent requests, newest first.
pub async fn list_history(State(state): State<SharedState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.recent().await)
}
