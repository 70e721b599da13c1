// ABOUTME: OpenAI-compatible chat completions adapter implementing the TextGenerator trait.
// ABOUTME: Sends the prompt as a single user message and returns the first choice's content.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::providers::check_status;
use crate::runtime::{GenerationError, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 2048;

pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        })
    }

    pub fn parse_response(response_body: &Value) -> Result<String, GenerationError> {
        let choices = response_body
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                GenerationError::InvalidResponse("missing choices array in response".to_string())
            })?;

        let choice = choices
            .first()
            .ok_or_else(|| GenerationError::InvalidResponse("empty choices array".to_string()))?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("");

        if content.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(
                "no text in response".to_string(),
            ));
        }

        Ok(content.to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = self.build_request_body(prompt);
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling openai");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider(format!("HTTP request failed: {}", e)))?;

        let response = check_status(response, "OPENAI_API_KEY").await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse JSON: {}", e)))?;

        Self::parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
