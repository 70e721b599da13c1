// ABOUTME: Static responder that describes the formatting accommodations for a declared accessibility need.
// ABOUTME: No model call; returns a fixed template per need and nothing at all when no need is declared.

use async_trait::async_trait;

use crate::context::{AccessibilityNeed, Context};
use crate::responder::{Responder, Section};

pub const DYSLEXIA_MESSAGE: &str = "♿ **Accessibility: Dyslexia Support Active**\n\
- Using larger text (22px)\n\
- Extra line spacing (2.0)\n\
- High-contrast display\n\
- Clear, simple language\n\
- Content chunked for easier processing";

pub const AUDIO_MESSAGE: &str = "♿ **Accessibility: Audio Support Active**\n\
- Text-to-speech optimized\n\
- Conversational tone for listening\n\
- Audio player available (if file uploaded)\n\
- Adjust playback speed as needed";

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessibilityResponder;

impl AccessibilityResponder {
    pub fn new() -> Self {
        Self
    }

    /// Guidance text for the context's accessibility need. Empty for `None`.
    pub fn make_accessible(&self, context: &Context) -> String {
        match &context.accessibility {
            AccessibilityNeed::None => String::new(),
            AccessibilityNeed::Dyslexia => DYSLEXIA_MESSAGE.to_string(),
            AccessibilityNeed::Audio => AUDIO_MESSAGE.to_string(),
            AccessibilityNeed::Other(need) => {
                format!("♿ Accessibility mode: {} support enabled", need)
            }
        }
    }
}

#[async_trait]
impl Responder for AccessibilityResponder {
    fn section(&self) -> Section {
        Section::Accessibility
    }

    async fn produce(&self, context: &Context) -> String {
        self.make_accessible(context)
    }
}
