// ABOUTME: Generative agents for equiedu, backed by an external text-generation service.
// ABOUTME: Defines the TextGenerator capability, vendor adapters, prompt templates, and the content/assessment responders.

pub mod assessment;
pub mod client;
pub mod content;
mod generative;
pub mod prompts;
pub mod providers;
pub mod runtime;
pub mod testing;

pub use assessment::AssessmentResponder;
pub use client::{GeneratorSettings, Provider, create_generator};
pub use content::ContentResponder;
pub use generative::{DEFAULT_GENERATION_TIMEOUT, ERROR_MARKER};
pub use runtime::{GenerationError, TextGenerator};

use std::sync::Arc;
use std::time::Duration;

use equiedu_core::{Orchestrator, Picker, RandomPicker};

/// Wire the full five-agent pipeline around one text generator.
pub fn standard_orchestrator(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Orchestrator {
    standard_orchestrator_with_picker(generator, timeout, Arc::new(RandomPicker))
}

/// Same as [`standard_orchestrator`] with an explicit motivation picker.
pub fn standard_orchestrator_with_picker(
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    picker: Arc<dyn Picker>,
) -> Orchestrator {
    let content = ContentResponder::new(Arc::clone(&generator)).with_timeout(timeout);
    let assessment = AssessmentResponder::new(generator).with_timeout(timeout);
    Orchestrator::standard(Arc::new(content), Arc::new(assessment), picker)
}
