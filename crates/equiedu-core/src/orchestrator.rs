// ABOUTME: Orchestrator that decides which responders run for a request and collects their sections.
// ABOUTME: Holds an ordered list of (trigger, responder) pairs and joins all triggered responders concurrently.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::accessibility::AccessibilityResponder;
use crate::context::{Context, Intent};
use crate::equity::EquityResponder;
use crate::motivation::{MotivationResponder, Picker};
use crate::responder::{Responder, Section};

/// Condition under which a responder runs for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Runs when the intent was requested.
    Intent(Intent),
    /// Runs when the context declares an accessibility need.
    AccessibilityDeclared,
    /// Runs for every request.
    Always,
}

impl Trigger {
    pub fn fires(&self, intents: &BTreeSet<Intent>, context: &Context) -> bool {
        match self {
            Trigger::Intent(intent) => intents.contains(intent),
            Trigger::AccessibilityDeclared => context.accessibility.is_declared(),
            Trigger::Always => true,
        }
    }
}

/// Section name to display text. Absent sections are not displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearningResponse {
    sections: BTreeMap<Section, String>,
}

impl LearningResponse {
    pub fn get(&self, section: Section) -> Option<&str> {
        self.sections.get(&section).map(String::as_str)
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    /// Present sections in display order.
    pub fn sections(&self) -> Vec<Section> {
        self.sections.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.sections.iter().map(|(s, t)| (*s, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<Section, String> {
        self.sections
    }

    /// All sections joined with blank lines, for plain-text output.
    pub fn to_plain_text(&self) -> String {
        self.sections
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn insert(&mut self, section: Section, text: String) {
        if !text.is_empty() {
            self.sections.insert(section, text);
        }
    }
}

/// Routes a request to the responders it needs and assembles their output.
pub struct Orchestrator {
    responders: Vec<(Trigger, Arc<dyn Responder>)>,
}

impl Orchestrator {
    pub fn new(responders: Vec<(Trigger, Arc<dyn Responder>)>) -> Self {
        Self { responders }
    }

    /// The canonical pipeline: requested generative responders, then
    /// accessibility when declared, then equity and motivation always.
    pub fn standard(
        content: Arc<dyn Responder>,
        assessment: Arc<dyn Responder>,
        picker: Arc<dyn Picker>,
    ) -> Self {
        let accessibility: Arc<dyn Responder> = Arc::new(AccessibilityResponder::new());
        let equity: Arc<dyn Responder> = Arc::new(EquityResponder::new());
        let motivation: Arc<dyn Responder> = Arc::new(MotivationResponder::new(picker));

        Self::new(vec![
            (Trigger::Intent(Intent::Content), content),
            (Trigger::Intent(Intent::Assessment), assessment),
            (Trigger::AccessibilityDeclared, accessibility),
            (Trigger::Always, equity),
            (Trigger::Always, motivation),
        ])
    }

    /// Sections that would be produced for this request, before running anything.
    pub fn planned_sections(&self, intents: &BTreeSet<Intent>, context: &Context) -> Vec<Section> {
        self.responders
            .iter()
            .filter(|(trigger, _)| trigger.fires(intents, context))
            .map(|(_, responder)| responder.section())
            .collect()
    }

    /// Run every triggered responder and wait for all of them.
    ///
    /// Responders are independent, so they run concurrently. Empty outputs
    /// are dropped. This never fails: responders convert their own errors
    /// into text.
    pub async fn handle_request(
        &self,
        intents: &BTreeSet<Intent>,
        context: &Context,
    ) -> LearningResponse {
        let selected: Vec<&Arc<dyn Responder>> = self
            .responders
            .iter()
            .filter(|(trigger, _)| trigger.fires(intents, context))
            .map(|(_, responder)| responder)
            .collect();

        tracing::info!(
            intents = ?intents,
            responders = selected.len(),
            accessibility = %context.accessibility,
            "handling learning request"
        );

        let outputs = join_all(selected.into_iter().map(|responder| async move {
            let section = responder.section();
            tracing::debug!(%section, "invoking responder");
            (section, responder.produce(context).await)
        }))
        .await;

        let mut response = LearningResponse::default();
        for (section, text) in outputs {
            if text.is_empty() {
                tracing::debug!(%section, "responder produced no text, omitting section");
            }
            response.insert(section, text);
        }

        tracing::info!(sections = response.len(), "learning request complete");
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::DYSLEXIA_MESSAGE;
    use crate::equity::{FAIR_FALLBACK, LOW_SES_RESOURCES, STEM_ROLE_MODELS};
    use crate::motivation::FixedPicker;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Responder that returns fixed text and counts invocations.
    struct CannedResponder {
        section: Section,
        text: String,
        calls: AtomicUsize,
    }

    impl CannedResponder {
        fn new(section: Section, text: &str) -> Arc<Self> {
            Arc::new(Self {
                section,
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Responder for CannedResponder {
        fn section(&self) -> Section {
            self.section
        }

        async fn produce(&self, _context: &Context) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.clone()
        }
    }

    fn intents(list: &[Intent]) -> BTreeSet<Intent> {
        list.iter().copied().collect()
    }

    fn sam_context() -> Context {
        Context::new("Sam", "Photosynthesis")
            .with_style("simple")
            .with_accessibility("dyslexia")
            .with_demographics(Some("female"), Some("low"))
    }

    #[tokio::test]
    async fn content_request_with_dyslexia_produces_four_sections() {
        let content = CannedResponder::new(Section::Content, "generated content");
        let assessment = CannedResponder::new(Section::Assessment, "generated quiz");
        let orch = Orchestrator::standard(
            content.clone(),
            assessment.clone(),
            Arc::new(FixedPicker(0)),
        );
        let ctx = sam_context();

        let resp = orch.handle_request(&intents(&[Intent::Content]), &ctx).await;

        assert_eq!(
            resp.sections(),
            vec![
                Section::Content,
                Section::Accessibility,
                Section::Equity,
                Section::Motivation
            ]
        );
        assert_eq!(resp.get(Section::Accessibility), Some(DYSLEXIA_MESSAGE));

        let equity = resp.get(Section::Equity).unwrap();
        assert!(equity.contains(LOW_SES_RESOURCES));
        assert!(!equity.contains(STEM_ROLE_MODELS));
        assert!(!equity.contains(FAIR_FALLBACK));

        let motivation = resp.get(Section::Motivation).unwrap().to_string();
        assert!(MotivationResponder::candidates(&ctx).contains(&motivation));

        assert_eq!(content.calls.load(Ordering::SeqCst), 1);
        assert_eq!(assessment.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_intents_and_no_accessibility_yield_equity_and_motivation() {
        let content = CannedResponder::new(Section::Content, "x");
        let assessment = CannedResponder::new(Section::Assessment, "y");
        let orch = Orchestrator::standard(
            content.clone(),
            assessment.clone(),
            Arc::new(FixedPicker(2)),
        );
        let ctx = Context::new("Sam", "History").with_accessibility("none");

        let resp = orch.handle_request(&BTreeSet::new(), &ctx).await;

        assert_eq!(resp.sections(), vec![Section::Equity, Section::Motivation]);
        assert_eq!(content.calls.load(Ordering::SeqCst), 0);
        assert_eq!(assessment.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn both_intents_run_both_generative_responders() {
        let orch = Orchestrator::standard(
            CannedResponder::new(Section::Content, "c"),
            CannedResponder::new(Section::Assessment, "a"),
            Arc::new(FixedPicker(0)),
        );
        let ctx = Context::new("Sam", "Gravity");

        let resp = orch
            .handle_request(&intents(&[Intent::Assessment, Intent::Content]), &ctx)
            .await;

        assert_eq!(resp.get(Section::Content), Some("c"));
        assert_eq!(resp.get(Section::Assessment), Some("a"));
        assert!(!resp.contains(Section::Accessibility));
    }

    #[tokio::test]
    async fn empty_responder_output_is_omitted() {
        let silent: Arc<dyn Responder> = CannedResponder::new(Section::Content, "");
        let equity: Arc<dyn Responder> = CannedResponder::new(Section::Equity, "fair");
        let orch = Orchestrator::new(vec![(Trigger::Always, silent), (Trigger::Always, equity)]);

        let resp = orch
            .handle_request(&BTreeSet::new(), &Context::new("Sam", "Art"))
            .await;

        assert_eq!(resp.sections(), vec![Section::Equity]);
    }

    #[tokio::test]
    async fn unknown_accessibility_need_still_gets_a_section() {
        let orch = Orchestrator::standard(
            CannedResponder::new(Section::Content, "c"),
            CannedResponder::new(Section::Assessment, "a"),
            Arc::new(FixedPicker(0)),
        );
        let ctx = Context::new("Sam", "Art").with_accessibility("braille");

        let resp = orch.handle_request(&BTreeSet::new(), &ctx).await;

        assert!(resp.get(Section::Accessibility).unwrap().contains("braille"));
    }

    #[test]
    fn planned_sections_follow_triggers() {
        let orch = Orchestrator::standard(
            CannedResponder::new(Section::Content, "c"),
            CannedResponder::new(Section::Assessment, "a"),
            Arc::new(FixedPicker(0)),
        );
        let ctx = Context::new("Sam", "Art").with_accessibility("audio");

        let planned = orch.planned_sections(&intents(&[Intent::Assessment]), &ctx);

        assert_eq!(
            planned,
            vec![
                Section::Assessment,
                Section::Accessibility,
                Section::Equity,
                Section::Motivation
            ]
        );
    }

    #[test]
    fn response_serializes_as_section_map() {
        let mut resp = LearningResponse::default();
        resp.insert(Section::Motivation, "go".to_string());
        resp.insert(Section::Equity, "fair".to_string());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({ "equity": "fair", "motivation": "go" }));
        assert_eq!(resp.to_plain_text(), "fair\n\ngo");
    }
}
