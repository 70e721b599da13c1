// ABOUTME: Shared call path for the generative agents: bounded, single-shot generation.
// ABOUTME: Wraps the TextGenerator call in a timeout and converts expiry into GenerationError::Timeout.

use std::time::Duration;

use crate::runtime::{GenerationError, TextGenerator};

/// Marker that prefixes every failure shown to the learner.
pub const ERROR_MARKER: &str = "❌";

/// Upper bound on a single generation call when none is configured.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One request to the generator, no retry, bounded by `timeout`.
pub(crate) async fn generate_bounded(
    generator: &dyn TextGenerator,
    prompt: &str,
    timeout: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(timeout, generator.generate_text(prompt)).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
