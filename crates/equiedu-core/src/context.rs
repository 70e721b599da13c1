// ABOUTME: Per-request learner context consumed by every responder, plus the typed fields inside it.
// ABOUTME: Parses the presentation layer's free-text choices into LearningStyle, AccessibilityNeed, and Intent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display name used when the learner leaves the name field blank.
pub const DEFAULT_LEARNER: &str = "Student";

/// How the learner prefers material to be explained.
///
/// Unrecognised values are preserved in `Other` so the generative prompt can
/// still mention them; the prompt's conditional clauses then fall back to the
/// model's default interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LearningStyle {
    #[default]
    Simple,
    Visual,
    Detailed,
    Other(String),
}

impl LearningStyle {
    pub fn as_str(&self) -> &str {
        match self {
            LearningStyle::Simple => "simple",
            LearningStyle::Visual => "visual",
            LearningStyle::Detailed => "detailed",
            LearningStyle::Other(s) => s,
        }
    }
}

impl From<&str> for LearningStyle {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => LearningStyle::Simple,
            "visual" => LearningStyle::Visual,
            "detailed" => LearningStyle::Detailed,
            _ => LearningStyle::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for LearningStyle {
    fn from(value: String) -> Self {
        LearningStyle::from(value.as_str())
    }
}

impl From<LearningStyle> for String {
    fn from(value: LearningStyle) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessibility accommodation the learner has declared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessibilityNeed {
    #[default]
    None,
    Dyslexia,
    Audio,
    Other(String),
}

impl AccessibilityNeed {
    pub fn as_str(&self) -> &str {
        match self {
            AccessibilityNeed::None => "none",
            AccessibilityNeed::Dyslexia => "dyslexia",
            AccessibilityNeed::Audio => "audio",
            AccessibilityNeed::Other(s) => s,
        }
    }

    /// True for every value except `None`.
    pub fn is_declared(&self) -> bool {
        !matches!(self, AccessibilityNeed::None)
    }
}

impl From<&str> for AccessibilityNeed {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => AccessibilityNeed::None,
            "dyslexia" => AccessibilityNeed::Dyslexia,
            "audio" => AccessibilityNeed::Audio,
            _ => AccessibilityNeed::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for AccessibilityNeed {
    fn from(value: String) -> Self {
        AccessibilityNeed::from(value.as_str())
    }
}

impl From<AccessibilityNeed> for String {
    fn from(value: AccessibilityNeed) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AccessibilityNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographic fields used only for equity pattern matching. Never validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub gender: Option<String>,
    /// Socioeconomic status, e.g. "low", "mid", "high".
    #[serde(default, rename = "SES", alias = "ses")]
    pub ses: Option<String>,
}

/// Read-only description of one learning request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub learner: String,
    pub topic: String,
    pub style: LearningStyle,
    pub accessibility: AccessibilityNeed,
    pub demographics: Demographics,
}

impl Context {
    pub fn new(learner: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            learner: learner.into(),
            topic: topic.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<LearningStyle>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_accessibility(mut self, accessibility: impl Into<AccessibilityNeed>) -> Self {
        self.accessibility = accessibility.into();
        self
    }

    pub fn with_demographics(mut self, gender: Option<&str>, ses: Option<&str>) -> Self {
        self.demographics = Demographics {
            gender: gender.map(String::from),
            ses: ses.map(String::from),
        };
        self
    }

    /// The learner's name, or the placeholder when it is blank.
    pub fn display_learner(&self) -> &str {
        let name = self.learner.trim();
        if name.is_empty() { DEFAULT_LEARNER } else { name }
    }

    /// True when the topic has visible characters.
    pub fn has_topic(&self) -> bool {
        !self.topic.trim().is_empty()
    }
}

/// A requested generative capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Content,
    Assessment,
}

impl Intent {
    pub const ALL: [Intent; 2] = [Intent::Content, Intent::Assessment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Content => "content",
            Intent::Assessment => "assessment",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntentError(pub String);

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown intent '{}': expected 'content' or 'assessment'",
            self.0
        )
    }
}

impl std::error::Error for ParseIntentError {}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Intent::Content),
            "assessment" => Ok(Intent::Assessment),
            other => Err(ParseIntentError(other.to_string())),
        }
    }
}
