// ABOUTME: Factory for text generators from resolved provider settings.
// ABOUTME: Maps a provider name, API key, model, and base URL to a shared Arc<dyn TextGenerator>.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::providers::{GeminiGenerator, OpenAiGenerator, gemini, openai};
use crate::runtime::TextGenerator;

/// Supported text-generation vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn model_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_MODEL",
            Provider::OpenAi => "OPENAI_MODEL",
        }
    }

    pub fn base_url_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_BASE_URL",
            Provider::OpenAi => "OPENAI_BASE_URL",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_MODEL,
            Provider::OpenAi => openai::DEFAULT_MODEL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_BASE_URL,
            Provider::OpenAi => openai::DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            unknown => Err(anyhow::anyhow!("unsupported text-generation provider: {}", unknown)),
        }
    }
}

/// Everything needed to reach one provider. Resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeneratorSettings {
    /// Settings with the provider's default model and base URL.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
        }
    }
}

// Hand-written so the API key never reaches logs.
impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Create a text generator for the given settings.
pub fn create_generator(
    settings: &GeneratorSettings,
) -> Result<Arc<dyn TextGenerator>, anyhow::Error> {
    if settings.api_key.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "{} environment variable not set",
            settings.provider.api_key_var()
        ));
    }

    let generator: Arc<dyn TextGenerator> = match settings.provider {
        Provider::Gemini => Arc::new(GeminiGenerator::new(
            settings.api_key.clone(),
            settings.base_url.clone(),
            settings.model.clone(),
        )),
        Provider::OpenAi => Arc::new(OpenAiGenerator::new(
            settings.api_key.clone(),
            settings.base_url.clone(),
            settings.model.clone(),
        )),
    };

    tracing::info!(
        provider = generator.provider_name(),
        model = generator.model_name(),
        "text generator ready"
    );

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to extract the error string from a create_generator result.
    /// Uses match instead of unwrap_err() because Arc<dyn TextGenerator> doesn't impl Debug.
    fn expect_err(result: Result<Arc<dyn TextGenerator>, anyhow::Error>) -> String {
        match result {
            Err(e) => e.to_string(),
            Ok(generator) => panic!("expected error, got {}", generator.provider_name()),
        }
    }

    #[test]
    fn provider_parses_names() {
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        let err = "mystery".parse::<Provider>().unwrap_err();
        assert!(err.to_string().contains("unsupported text-generation provider"));
    }

    #[test]
    fn settings_use_provider_defaults() {
        let settings = GeneratorSettings::new(Provider::Gemini, "key");
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn settings_debug_redacts_key() {
        let settings = GeneratorSettings::new(Provider::OpenAi, "sk-secret");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let settings = GeneratorSettings::new(Provider::Gemini, "  ");
        let err = expect_err(create_generator(&settings));
        assert!(err.contains("GEMINI_API_KEY"), "got: {}", err);
    }

    #[test]
    fn creates_generator_for_each_provider() {
        for provider in [Provider::Gemini, Provider::OpenAi] {
            let generator = match create_generator(&GeneratorSettings::new(provider, "key")) {
                Ok(g) => g,
                Err(e) => panic!("expected Ok, got Err: {}", e),
            };
            assert_eq!(generator.provider_name(), provider.as_str());
            assert_eq!(generator.model_name(), provider.default_model());
        }
    }
}
