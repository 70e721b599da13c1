// ABOUTME: Static responder that reports fairness accommodations based on demographics and topic.
// ABOUTME: Adds low-SES support lines and STEM representation lines, or a single "fair" line otherwise.

use async_trait::async_trait;

use crate::context::Context;
use crate::responder::{Responder, Section};

pub const EQUITY_HEADER: &str = "⚖️ **Equity Check:**";
pub const LOW_SES_RESOURCES: &str =
    "✓ Extra learning resources provided for students with limited access";
pub const LOW_SES_OPEN_MATERIALS: &str =
    "✓ Free online resources and open educational materials linked";
pub const STEM_ROLE_MODELS: &str = "✓ Highlighting diverse role models in STEM";
pub const STEM_REPRESENTATION: &str = "✓ Research shows representation improves outcomes";
pub const FAIR_FALLBACK: &str = "✓ Content is fair and accessible for all demographics";

/// Uppercase substrings that mark a topic as STEM.
pub const STEM_KEYWORDS: [&str; 5] = ["MATH", "SCIENCE", "PHYSICS", "CHEMISTRY", "ENGINEERING"];

#[derive(Debug, Clone, Copy, Default)]
pub struct EquityResponder;

impl EquityResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn check_fairness(&self, context: &Context) -> String {
        let demographics = &context.demographics;
        let mut lines = vec![EQUITY_HEADER];

        if demographics.ses.as_deref() == Some("low") {
            lines.push(LOW_SES_RESOURCES);
            lines.push(LOW_SES_OPEN_MATERIALS);
        }

        if demographics.gender.as_deref() == Some("female") && is_stem_topic(&context.topic) {
            lines.push(STEM_ROLE_MODELS);
            lines.push(STEM_REPRESENTATION);
        }

        if lines.len() == 1 {
            lines.push(FAIR_FALLBACK);
        }

        lines.join("\n")
    }
}

/// Case-insensitive substring match against the STEM keyword set.
pub fn is_stem_topic(topic: &str) -> bool {
    let upper = topic.to_uppercase();
    STEM_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

#[async_trait]
impl Responder for EquityResponder {
    fn section(&self) -> Section {
        Section::Equity
    }

    async fn produce(&self, context: &Context) -> String {
        self.check_fairness(context)
    }
}
