// ABOUTME: Shared application state for the equiedu HTTP server.
// ABOUTME: Holds the orchestrator, session history, and provider labels; provides prod and test constructors.

use std::sync::Arc;

use equiedu_core::Orchestrator;

use crate::history::SessionHistory;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub history: SessionHistory,
    /// Provider and model shown in the page footer, e.g. "gemini / gemini-2.5-flash".
    pub provider_label: String,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(orchestrator: Orchestrator, history_limit: usize, provider_label: String) -> Self {
        Self {
            orchestrator,
            history: SessionHistory::new(history_limit),
            provider_label,
        }
    }
}
