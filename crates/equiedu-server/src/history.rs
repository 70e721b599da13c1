// ABOUTME: In-memory session history of recent learning requests for the UI's "Session Memory" panel.
// ABOUTME: Bounded ring of entries, newest first on read; never persisted.

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use equiedu_core::{Context, Intent, LearningResponse, Section};
use serde::Serialize;
use tokio::sync::RwLock;
use ulid::Ulid;

/// Summary of one handled request.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub request_id: Ulid,
    pub learner: String,
    pub topic: String,
    pub style: String,
    pub accessibility: String,
    pub intents: Vec<Intent>,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        request_id: Ulid,
        context: &Context,
        intents: &BTreeSet<Intent>,
        response: &LearningResponse,
    ) -> Self {
        Self {
            request_id,
            learner: context.display_learner().to_string(),
            topic: context.topic.trim().to_string(),
            style: context.style.to_string(),
            accessibility: context.accessibility.to_string(),
            intents: intents.iter().copied().collect(),
            sections: response.sections(),
            created_at: Utc::now(),
        }
    }
}

/// Keeps the last `limit` entries. A limit of zero disables history.
pub struct SessionHistory {
    limit: usize,
    entries: RwLock<VecDeque<HistoryEntry>>,
}

impl SessionHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: RwLock::new(VecDeque::with_capacity(limit)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn record(&self, entry: HistoryEntry) {
        if self.limit == 0 {
            return;
        }
        let mut entries = self.entries.write().await;
        while entries.len() >= self.limit {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Entries newest first.
    pub async fn recent(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.iter().rev().cloned().collect()
    }
}
