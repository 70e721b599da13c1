// ABOUTME: Core domain for equiedu: the per-request learner context and the responders that read it.
// ABOUTME: Defines the Responder trait, the static responders, and the orchestrator that runs them.

pub mod accessibility;
pub mod context;
pub mod equity;
pub mod motivation;
pub mod orchestrator;
pub mod responder;

pub use accessibility::AccessibilityResponder;
pub use context::{AccessibilityNeed, Context, Demographics, Intent, LearningStyle, ParseIntentError};
pub use equity::EquityResponder;
pub use motivation::{FixedPicker, MotivationResponder, Picker, RandomPicker};
pub use orchestrator::{LearningResponse, Orchestrator, Trigger};
pub use responder::{Responder, Section};
