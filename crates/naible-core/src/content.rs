//! PersonalizedContent domain model and the canned fallback copy.

use serde::{Deserialize, Serialize};

/// Marketing copy shown on the personalised hero page.
///
/// Overwritten wholesale on each regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedContent {
    pub headline: String,
    pub subheading: String,
    pub cta_text: String,
    pub welcome_message: String,
}

pub const FALLBACK_HEADLINE: &str = "Own Your AI: Introducing Personal Intelligence by Naible";
pub const FALLBACK_SUBHEADING: &str = "A private, evolving AI that's 100% yours—trained on your data, serving your needs, and controlled by you alone.";
pub const FALLBACK_CTA: &str = "Get Early Access";

const FALLBACK_WELCOME_MESSAGES: [&str; 3] = [
    "Welcome to your personalized Naible experience! We've created this based on your preferences.",
    "Welcome to Naible! We've created a personalized experience based on your preferences.",
    "Welcome to your personalized Naible experience!",
];

/// Number of canned fallback blocks.
pub const FALLBACK_COUNT: usize = FALLBACK_WELCOME_MESSAGES.len();

impl PersonalizedContent {
    /// Returns fallback block `index` (wrapping).
    ///
    /// Block 0 is the copy used when generation fails on the goals step.
    pub fn fallback(index: usize) -> Self {
        Self {
            headline: FALLBACK_HEADLINE.to_string(),
            subheading: FALLBACK_SUBHEADING.to_string(),
            cta_text: FALLBACK_CTA.to_string(),
            welcome_message: FALLBACK_WELCOME_MESSAGES[index % FALLBACK_COUNT].to_string(),
        }
    }

    /// All fallback blocks in order.
    pub fn fallbacks() -> Vec<Self> {
        (0..FALLBACK_COUNT).map(Self::fallback).collect()
    }

    /// True when every field carries text.
    pub fn is_complete(&self) -> bool {
        [
            &self.headline,
            &self.subheading,
            &self.cta_text,
            &self.welcome_message,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

impl Default for PersonalizedContent {
    /// Copy shown before any generation has happened.
    fn default() -> Self {
        Self::fallback(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_zero_is_goal_step_copy() {
        let content = PersonalizedContent::fallback(0);
        assert_eq!(content.headline, FALLBACK_HEADLINE);
        assert_eq!(content.cta_text, "Get Early Access");
        assert_eq!(
            content.welcome_message,
            "Welcome to your personalized Naible experience! We've created this based on your preferences."
        );
    }

    #[test]
    fn test_fallback_wraps() {
        assert_eq!(
            PersonalizedContent::fallback(FALLBACK_COUNT),
            PersonalizedContent::fallback(0)
        );
        assert_eq!(PersonalizedContent::fallbacks().len(), FALLBACK_COUNT);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(PersonalizedContent::fallback(1)).unwrap();
        assert!(json.get("ctaText").is_some());
        assert!(json.get("welcomeMessage").is_some());
        assert!(json.get("cta_text").is_none());
    }

    #[test]
    fn test_is_complete() {
        let mut content = PersonalizedContent::default();
        assert!(content.is_complete());
        content.cta_text = "  ".to_string();
        assert!(!content.is_complete());
    }
}
