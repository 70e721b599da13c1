// ABOUTME: Test utilities for equiedu-agent, including a stub text generator.
// ABOUTME: Used in tests to simulate the generation service and count calls without network access.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::runtime::{GenerationError, TextGenerator};

#[derive(Debug, Clone)]
enum StubReply {
    Text(String),
    Fail(String),
}

/// A stub generator that returns a pre-configured reply and records every
/// prompt it receives.
#[derive(Debug)]
pub struct StubGenerator {
    reply: StubReply,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    /// Create a stub that always returns the given text.
    pub fn new(response_text: &str) -> Self {
        Self {
            reply: StubReply::Text(response_text.to_owned()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a stub that always fails with a provider error carrying `description`.
    pub fn failing(description: &str) -> Self {
        Self {
            reply: StubReply::Fail(description.to_owned()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before replying, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Fail(description) => Err(GenerationError::Provider(description.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}
