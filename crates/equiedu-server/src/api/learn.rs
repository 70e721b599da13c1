// ABOUTME: Learning request API handler: runs the orchestrator for a context and set of intents.
// ABOUTME: POST /api/learn accepts {context, intents} and returns the ordered section map.

use std::collections::BTreeSet;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use equiedu_core::{Context, Intent, LearningResponse, Section};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use ulid::Ulid;

use crate::app_state::SharedState;
use crate::history::HistoryEntry;

/// Request body for a learning request.
#[derive(Debug, Deserialize)]
pub struct LearnRequest {
    pub context: Context,
    #[serde(default)]
    pub intents: Vec<String>,
}

/// Response body. JSON objects are unordered, so `order` lists the
/// present sections in display order.
#[derive(Debug, Serialize)]
pub struct LearnResponse {
    pub request_id: String,
    pub order: Vec<Section>,
    pub sections: LearningResponse,
}

/// Parse intent names, rejecting unknown ones.
pub fn parse_intents(names: &[String]) -> Result<BTreeSet<Intent>, String> {
    names
        .iter()
        .map(|name| name.parse::<Intent>().map_err(|e| e.to_string()))
        .collect()
}

/// Run one request through the orchestrator and record it in session history.
pub async fn run_learning_request(
    state: &SharedState,
    context: &Context,
    intents: &BTreeSet<Intent>,
) -> (Ulid, LearningResponse) {
    let request_id = Ulid::new();

    let response = state
        .orchestrator
        .handle_request(intents, context)
        .instrument(tracing::info_span!("learn", %request_id))
        .await;

    state
        .history
        .record(HistoryEntry::new(request_id, context, intents, &response))
        .await;

    (request_id, response)
}

/// POST /api/learn - Produce learning sections for a context.
///
/// Malformed bodies keep axum's status code but get a JSON error body.
pub async fn learn(
    State(state): State<SharedState>,
    body: Result<Json<LearnRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected learn request body");
            return (
                rejection.status(),
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let intents = match parse_intents(&req.intents) {
        Ok(intents) => intents,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": e })),
            )
                .into_response();
        }
    };

    let (request_id, sections) = run_learning_request(&state, &req.context, &intents).await;

    Json(LearnResponse {
        request_id: request_id.to_string(),
        order: sections.sections(),
        sections,
    })
    .into_response()
}
