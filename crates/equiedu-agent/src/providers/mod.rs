// ABOUTME: Provider module aggregating the text-generation vendor adapters.
// ABOUTME: Each sub-module implements TextGenerator for one HTTP API; status mapping is shared here.

pub mod gemini;
pub mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

use crate::runtime::GenerationError;

/// Map non-success HTTP statuses onto GenerationError variants.
/// `key_var` names the env var to mention in auth failures.
pub(crate) async fn check_status(
    response: reqwest::Response,
    key_var: &str,
) -> Result<reqwest::Response, GenerationError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GenerationError::RateLimited);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(GenerationError::Unauthorized(format!("check {}", key_var)));
    }

    if status.is_server_error() {
        return Err(GenerationError::Provider(format!("Server error: {}", status)));
    }

    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(GenerationError::Provider(format!(
            "API error {}: {}",
            status, error_body
        )));
    }

    Ok(response)
}
