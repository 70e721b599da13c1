// ABOUTME: Google Gemini API adapter implementing the TextGenerator trait.
// ABOUTME: Sends a single-turn generateContent request and lists models that support it.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::providers::check_status;
use crate::runtime::{GenerationError, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const MAX_TOKENS: u32 = 2048;
/// Upper bound on a models.list round trip.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini text generator. Calls `models/{model}:generateContent` and
/// concatenates the text parts of the first candidate.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    list_timeout: Duration,
}

impl GeminiGenerator {
    /// Create a generator with explicit configuration.
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            list_timeout: DEFAULT_LIST_TIMEOUT,
        }
    }

    pub fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    /// Build the JSON request body for a single user prompt.
    pub fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": prompt}]
                }
            ],
            "generation_config": {
                "max_output_tokens": MAX_TOKENS
            }
        })
    }

    /// Extract generated text from a generateContent response.
    pub fn parse_response(response_body: &Value) -> Result<String, GenerationError> {
        let candidates = response_body
            .get("candidates")
            .and_then(|c| c.as_array())
            .filter(|c| !c.is_empty());

        let Some(candidates) = candidates else {
            if let Some(reason) = response_body
                .get("promptFeedback")
                .and_then(|f| f.get("blockReason"))
                .and_then(|r| r.as_str())
            {
                return Err(GenerationError::InvalidResponse(format!(
                    "prompt blocked: {}",
                    reason
                )));
            }
            return Err(GenerationError::InvalidResponse(
                "missing candidates array in response".to_string(),
            ));
        };

        let candidate = &candidates[0];

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                let reason = candidate
                    .get("finishReason")
                    .and_then(|f| f.as_str())
                    .unwrap_or("unknown");
                GenerationError::InvalidResponse(format!(
                    "candidate has no content (finish reason: {})",
                    reason
                ))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(
                "no text in response".to_string(),
            ));
        }

        Ok(text)
    }

    /// Parse a models.list response, keeping models that support generateContent.
    pub fn parse_model_list(response_body: &Value) -> Vec<String> {
        response_body
            .get("models")
            .and_then(|m| m.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter(|model| {
                        model
                            .get("supportedGenerationMethods")
                            .and_then(|s| s.as_array())
                            .is_some_and(|methods| {
                                methods
                                    .iter()
                                    .any(|m| m.as_str() == Some("generateContent"))
                            })
                    })
                    .filter_map(|model| model.get("name").and_then(|n| n.as_str()))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// List models available to this key that can generate content.
    /// Bounded by the list timeout.
    pub async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        match tokio::time::timeout(self.list_timeout, self.fetch_model_list()).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.list_timeout)),
        }
    }

    async fn fetch_model_list(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}/v1beta/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("pageSize", "1000")])
            .send()
            .await
            .map_err(|e| GenerationError::Provider(format!("HTTP request failed: {}", e)))?;

        let response = check_status(response, "GEMINI_API_KEY").await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse JSON: {}", e)))?;

        Ok(Self::parse_model_list(&body))
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = Self::build_request_body(prompt);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider(format!("HTTP request failed: {}", e)))?;

        let response = check_status(response, "GEMINI_API_KEY").await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse JSON: {}", e)))?;

        Self::parse_response(&response_body)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn text_response(text: &str) -> Value {
        json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": text}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        })
    }

    #[test]
    fn gemini_generator_creation() {
        let generator = GeminiGenerator::new(
            "test-key".to_string(),
            "https://generativelanguage.googleapis.com/".to_string(),
            DEFAULT_MODEL.to_string(),
        );

        assert_eq!(generator.provider_name(), "gemini");
        assert_eq!(generator.model_name(), "gemini-2.5-flash");
        assert_eq!(generator.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn request_body_carries_prompt() {
        let body = GeminiGenerator::build_request_body("Explain gravity");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert_eq!(text, "Explain gravity");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generation_config"]["max_output_tokens"], 2048);
    }

    #[test]
    fn parses_multi_part_text() {
        let response = json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "Plants make "}, {"text": "food."}],
                        "role": "model"
                    }
                }
            ]
        });
        assert_eq!(
            GeminiGenerator::parse_response(&response).unwrap(),
            "Plants make food."
        );
    }

    #[test]
    fn blocked_prompt_is_invalid_response() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = GeminiGenerator::parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn candidate_without_content_reports_finish_reason() {
        let response = json!({ "candidates": [ { "finishReason": "MAX_TOKENS" } ] });
        let err = GeminiGenerator::parse_response(&response).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn empty_text_is_invalid_response() {
        let err = GeminiGenerator::parse_response(&text_response("   ")).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn model_list_keeps_generate_content_models() {
        let body = json!({
            "models": [
                {
                    "name": "models/gemini-2.5-flash",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/text-embedding-004",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        });
        assert_eq!(
            GeminiGenerator::parse_model_list(&body),
            vec!["models/gemini-2.5-flash".to_string()]
        );
        assert!(GeminiGenerator::parse_model_list(&json!({})).is_empty());
    }

    #[tokio::test]
    async fn generate_text_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Chlorophyll!")))
            .expect(1)
            .mount(&server)
            .await;

        let generator =
            GeminiGenerator::new("test-key".to_string(), server.uri(), DEFAULT_MODEL.to_string());
        let text = generator.generate_text("Explain photosynthesis").await.unwrap();
        assert_eq!(text, "Chlorophyll!");
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let generator =
            GeminiGenerator::new("test-key".to_string(), server.uri(), DEFAULT_MODEL.to_string());
        let err = generator.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::RateLimited));
    }

    #[tokio::test]
    async fn forbidden_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let generator =
            GeminiGenerator::new("bad-key".to_string(), server.uri(), DEFAULT_MODEL.to_string());
        let err = generator.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, GenerationError::Unauthorized(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn list_models_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {
                        "name": "models/gemini-2.5-flash",
                        "supportedGenerationMethods": ["generateContent"]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let generator =
            GeminiGenerator::new("test-key".to_string(), server.uri(), DEFAULT_MODEL.to_string());
        let models = generator.list_models().await.unwrap();
        assert_eq!(models, vec!["models/gemini-2.5-flash".to_string()]);
    }

    #[tokio::test]
    async fn list_models_times_out_on_stalled_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "models": [] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let generator =
            GeminiGenerator::new("test-key".to_string(), server.uri(), DEFAULT_MODEL.to_string())
                .with_list_timeout(Duration::from_millis(50));
        let err = generator.list_models().await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));
    }

    #[tokio::test]
    #[cfg(feature = "live-test")]
    async fn gemini_live_generation() {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        let generator = GeminiGenerator::new(
            api_key,
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
        );

        let result = generator.generate_text("Say hello in five words.").await;
        assert!(result.is_ok(), "live test failed: {:?}", result.err());
    }
}
