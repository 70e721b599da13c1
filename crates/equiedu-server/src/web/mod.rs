// ABOUTME: Web UI route handlers serving HTML via Askama templates and HTMX.
// ABOUTME: Renders the learning form, the per-request response sections, and the session memory panel.

use std::collections::BTreeSet;

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use equiedu_core::{AccessibilityNeed, Context, Intent, LearningResponse, Section};
use pulldown_cmark::{Event, Options, Parser, html};
use serde::Deserialize;

use crate::api::learn::run_learning_request;
use crate::app_state::SharedState;
use crate::history::HistoryEntry;

use askama::Template;
use askama_derive_axum::IntoResponse as AskamaIntoResponse;

pub const MISSING_TOPIC_ERROR: &str = "Please enter a topic to learn about!";

/// Index page with the learning form and an empty response area.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub provider_label: String,
}

/// GET / - Render the learning form.
pub async fn index(State(state): State<SharedState>) -> IndexTemplate {
    IndexTemplate {
        provider_label: state.provider_label.clone(),
    }
}

/// One rendered section of a learning response.
pub struct SectionView {
    pub key: String,
    pub title: String,
    /// Markdown already rendered to HTML with raw HTML escaped.
    pub html: String,
    pub dyslexia_box: bool,
}

impl SectionView {
    fn build(section: Section, text: &str, accessibility: &AccessibilityNeed) -> Self {
        let generated = matches!(section, Section::Content | Section::Assessment);
        Self {
            key: section.as_str().to_string(),
            title: section.title().to_string(),
            html: render_markdown(text),
            dyslexia_box: generated && *accessibility == AccessibilityNeed::Dyslexia,
        }
    }
}

/// Partial: response sections, or an inline error.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "partials/response.html")]
pub struct ResponseTemplate {
    pub error: Option<String>,
    pub sections: Vec<SectionView>,
}

impl ResponseTemplate {
    fn error(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            sections: Vec::new(),
        }
    }

    fn from_response(response: &LearningResponse, accessibility: &AccessibilityNeed) -> Self {
        Self {
            error: None,
            sections: response
                .iter()
                .map(|(section, text)| SectionView::build(section, text, accessibility))
                .collect(),
        }
    }
}

/// Form data posted by the learning form. Checkboxes are absent when unchecked.
#[derive(Debug, Default, Deserialize)]
pub struct LearnForm {
    #[serde(default)]
    pub learner: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub ses: String,
    pub want_content: Option<String>,
    pub want_assessment: Option<String>,
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

impl LearnForm {
    pub fn intents(&self) -> BTreeSet<Intent> {
        let mut intents = BTreeSet::new();
        if self.want_content.is_some() {
            intents.insert(Intent::Content);
        }
        if self.want_assessment.is_some() {
            intents.insert(Intent::Assessment);
        }
        intents
    }

    pub fn to_context(&self) -> Context {
        let mut context = Context::new(self.learner.trim(), self.topic.trim())
            .with_accessibility(self.accessibility.as_str())
            .with_demographics(non_blank(&self.gender), non_blank(&self.ses));
        if let Some(style) = non_blank(&self.style) {
            context = context.with_style(style);
        }
        context
    }
}

/// POST /web/learn - Run the orchestrator for the submitted form.
///
/// Successful runs also emit an `HX-Trigger: learned` header so the session
/// memory panel refreshes itself.
pub async fn learn(State(state): State<SharedState>, Form(form): Form<LearnForm>) -> Response {
    let context = form.to_context();
    if !context.has_topic() {
        return ResponseTemplate::error(MISSING_TOPIC_ERROR).into_response();
    }

    let intents = form.intents();
    let (_request_id, response) = run_learning_request(&state, &context, &intents).await;

    (
        [("hx-trigger", "learned")],
        ResponseTemplate::from_response(&response, &context.accessibility),
    )
        .into_response()
}

/// Session memory row for templates.
pub struct HistoryView {
    pub number: usize,
    pub topic: String,
    pub learner: String,
    pub style: String,
    pub accessibility: String,
    pub sections: String,
    pub created_at: String,
}

/// Partial: the session memory panel.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "partials/history.html")]
pub struct HistoryTemplate {
    pub entries: Vec<HistoryView>,
}

impl HistoryTemplate {
    /// Entries arrive newest first; the newest gets the highest number.
    fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let total = entries.len();
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| HistoryView {
                number: total - i,
                topic: entry.topic,
                learner: entry.learner,
                style: entry.style,
                accessibility: entry.accessibility,
                sections: entry
                    .sections
                    .iter()
                    .map(|s| s.title())
                    .collect::<Vec<_>>()
                    .join(", "),
                created_at: entry.created_at.format("%H:%M:%S").to_string(),
            })
            .collect();
        Self { entries }
    }
}

/// GET /web/history - Return the session memory panel as an HTML partial.
pub async fn history(State(state): State<SharedState>) -> HistoryTemplate {
    HistoryTemplate::from_entries(state.history.recent().await)
}

/// Render responder markdown to HTML. Raw HTML in the source is shown as
/// text, since generated content is untrusted.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
