// ABOUTME: Assessment agent that asks the text-generation service for a short quiz on the topic.
// ABOUTME: Validates the topic, bounds the call, and converts failures into a marked error line.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use equiedu_core::{Context, Responder, Section};

use crate::generative::{DEFAULT_GENERATION_TIMEOUT, ERROR_MARKER, generate_bounded};
use crate::prompts::assessment_prompt;
use crate::runtime::TextGenerator;

pub const MISSING_TOPIC_MESSAGE: &str = "❌ AssessmentAgent: Please specify a topic.";

pub struct AssessmentResponder {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl AssessmentResponder {
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

        let prompt = assessment_prompt(context);

        match generate_bounded(self.generator.as_ref(), &prompt, self.timeout).await {
            Ok(text) => format!("📝 **Quiz for {}:**\n\n{}", context.display_learner(), text),
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.provider_name(),
                    error = %e,
                    "assessment generation failed"
                );
                format!("{} AssessmentAgent Error: {}", ERROR_MARKER, e)
            }
        }
    }
}

#[async_trait]
impl Responder for AssessmentResponder {
    fn section(&self) -> Section {
        Section::Assessment
    }

    async fn produce(&self, context: &Context) -> String {
        self.generate(context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubGenerator;

    #[tokio::test]
    async fn wraps_quiz_with_header() {
        let stub = Arc::new(StubGenerator::new("1. What is a cell?"));
        let responder = AssessmentResponder::new(stub.clone());

        let text = responder.generate(&Context::new("Ana", "Biology")).await;

        assert_eq!(text, "📝 **Quiz for Ana:**\n\n1. What is a cell?");
        assert!(stub.prompts()[0].contains("3-question quiz about Biology"));
    }

    #[tokio::test]
    async fn blank_topic_skips_the_service() {
        let stub = Arc::new(StubGenerator::new("unused"));
        let responder = AssessmentResponder::new(stub.clone());

        let text = responder.generate(&Context::new("Ana", "  ")).await;

        assert_eq!(text, MISSING_TOPIC_MESSAGE);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn failure_becomes_marked_text() {
        let responder = AssessmentResponder::new(Arc::new(StubGenerator::failing("network down")));

        let text = responder.generate(&Context::new("Ana", "Biology")).await;

        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("AssessmentAgent Error"));
        assert!(text.contains("network down"));
    }

    #[tokio::test]
    async fn timeout_is_reported_as_failure() {
        let stub = Arc::new(StubGenerator::new("too late").with_delay(Duration::from_millis(500)));
        let responder = AssessmentResponder::new(stub.clone()).with_timeout(Duration::from_millis(20));

        let text = responder.generate(&Context::new("Ana", "Biology")).await;

        assert!(text.starts_with(&format!("{} AssessmentAgent Error:", ERROR_MARKER)));
        assert!(text.contains("Timed out"));
        assert!(!text.contains("too late"));
        assert_eq!(stub.call_count(), 1);
    }
}
