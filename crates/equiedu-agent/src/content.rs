// ABOUTME: Content agent that asks the text-generation service for a personalised explanation.
// ABOUTME: Validates the topic, bounds the call, and degrades failures to an error line plus a fallback sentence.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use equiedu_core::{Context, Responder, Section};

use crate::generative::{DEFAULT_GENERATION_TIMEOUT, ERROR_MARKER, generate_bounded};
use crate::prompts::content_prompt;
use crate::runtime::TextGenerator;

pub const MISSING_TOPIC_MESSAGE: &str = "❌ ContentAgent: Please specify a topic.";

pub struct ContentResponder {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl ContentResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn generate(&self, context: &Context) -> String {
        if !context.has_topic() {
            return MISSING_TOPIC_MESSAGE.to_string();
        }

        let learner = context.display_learner();
        let topic = context.topic.trim();
        let prompt = content_prompt(context);

        match generate_bounded(self.generator.as_ref(), &prompt, self.timeout).await {
            Ok(text) => format!("📚 **{}'s Learning Content:**\n\n{}", learner, text),
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.provider_name(),
                    error = %e,
                    "content generation failed, using fallback"
                );
                format!(
                    "{} ContentAgent Error: {}\n\nFalling back to basic explanation: {} is an important concept worth exploring.",
                    ERROR_MARKER, e, topic
                )
            }
        }
    }
}

#[async_trait]
impl Responder for ContentResponder {
    fn section(&self) -> Section {
        Section::Content
    }

    async fn produce(&self, context: &Context) -> String {
        self.generate(context).await
    }
}
