// ABOUTME: Defines the TextGenerator trait that every text-generation vendor adapter implements.
// ABOUTME: Also defines GenerationError, the single failure type generative agents must absorb.

use std::time::Duration;

use async_trait::async_trait;

/// Everything that can go wrong while asking the service for text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

/// Capability to turn a prompt into generated text. Vendors are
/// interchangeable behind this trait.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit one prompt and return the generated text.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Provider name for logging (e.g. "gemini").
    fn provider_name(&self) -> &str;

    /// Model identifier being used.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_display() {
        let errors = vec![
            GenerationError::Provider("connection refused".to_string()),
            GenerationError::InvalidResponse("missing candidates".to_string()),
            GenerationError::Unauthorized("check GEMINI_API_KEY".to_string()),
            GenerationError::RateLimited,
            GenerationError::Timeout(Duration::from_secs(30)),
        ];

        for err in &errors {
            assert!(!err.to_string().is_empty());
        }

        assert!(
            GenerationError::Provider("connection refused".to_string())
                .to_string()
                .contains("connection refused")
        );
        assert_eq!(
            GenerationError::Timeout(Duration::from_secs(30)).to_string(),
            "Timed out after 30s"
        );
    }
}
