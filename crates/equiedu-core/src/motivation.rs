// ABOUTME: Static responder that picks one encouraging message for the learner and topic.
// ABOUTME: The selection source is an injectable Picker so tests can replace randomness.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::context::Context;
use crate::responder::{Responder, Section};

/// Placeholder topic used when the learner gave none.
const DEFAULT_TOPIC: &str = "this subject";

/// Chooses an index among `len` candidates.
pub trait Picker: Send + Sync {
    /// Must return a value in `0..len` when `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform selection from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same index (wrapped into range). For tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.0 % len }
    }
}

pub struct MotivationResponder {
    picker: Arc<dyn Picker>,
}

impl Default for MotivationResponder {
    fn default() -> Self {
        Self::new(Arc::new(RandomPicker))
    }
}

impl MotivationResponder {
    pub fn new(picker: Arc<dyn Picker>) -> Self {
        Self { picker }
    }

    /// Every message this responder can produce for the context.
    pub fn candidates(context: &Context) -> Vec<String> {
        let learner = context.display_learner();
        let topic = if context.has_topic() {
            context.topic.trim()
        } else {
            DEFAULT_TOPIC
        };

        vec![
            format!(
                "💪 Keep going, {learner}! Learning {topic} takes effort, but you're making great progress."
            ),
            format!("🌟 {learner}, every question you ask brings you closer to mastering {topic}!"),
            format!(
                "🚀 You've got this, {learner}! {topic} might seem challenging now, but you're building valuable skills."
            ),
            format!(
                "✨ Great work exploring {topic}, {learner}! Curiosity is the first step to excellence."
            ),
            format!(
                "🎯 {learner}, your dedication to understanding {topic} is impressive. Stay focused!"
            ),
            format!(
                "💡 {learner}, remember: every expert was once a beginner in {topic}. You're on the right path!"
            ),
        ]
    }

    pub fn motivate(&self, context: &Context) -> String {
        let mut candidates = Self::candidates(context);
        let idx = self.picker.pick(candidates.len()).min(candidates.len() - 1);
        candidates.swap_remove(idx)
    }
}

#[async_trait]
impl Responder for MotivationResponder {
    fn section(&self) -> Section {
        Section::Motivation
    }

    async fn produce(&self, context: &Context) -> String {
        self.motivate(context)
    }
}
