// ABOUTME: Defines the Responder trait every agent implements and the Section slots they fill.
// ABOUTME: A responder maps a Context to display text for exactly one section and never fails.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::Context;

/// A named slot in the learning response. Ordering follows display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Content,
    Assessment,
    Accessibility,
    Equity,
    Motivation,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Content,
        Section::Assessment,
        Section::Accessibility,
        Section::Equity,
        Section::Motivation,
    ];

    /// Lowercase key used in the returned mapping and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Content => "content",
            Section::Assessment => "assessment",
            Section::Accessibility => "accessibility",
            Section::Equity => "equity",
            Section::Motivation => "motivation",
        }
    }

    /// Heading shown above the section in the UI.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Content => "Content",
            Section::Assessment => "Assessment",
            Section::Accessibility => "Accessibility",
            Section::Equity => "Equity",
            Section::Motivation => "Motivation",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One agent in the learning pipeline.
///
/// Implementations own their failure handling: any validation or service
/// error must be turned into display text, so `produce` always yields a
/// string. An empty string means "nothing to show" and the orchestrator
/// omits the section.
#[async_trait]
pub trait Responder: Send + Sync {
    /// The section this responder fills.
    fn section(&self) -> Section;

    /// Produce the section text for the given context.
    async fn produce(&self, context: &Context) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_sort_in_display_order() {
        let mut shuffled = vec![
            Section::Motivation,
            Section::Content,
            Section::Equity,
            Section::Accessibility,
            Section::Assessment,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Section::ALL.to_vec());
    }

    #[test]
    fn section_serializes_lowercase() {
        let json = serde_json::to_string(&Section::Accessibility).unwrap();
        assert_eq!(json, "\"accessibility\"");
        assert_eq!(Section::Equity.title(), "Equity");
    }
}
