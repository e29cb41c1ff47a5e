//! Conversation domain module.
//!
//! The onboarding conversation is a strictly linear sequence of steps; the
//! controller that drives it lives in the application crate.

mod step;

pub use step::{ConversationStep, StepResponse, TOTAL_QUESTION_STEPS};

/// Prompt copy shown for a step. Steps without a question return `""`.
pub fn question(step: ConversationStep) -> &'static str {
    match step {
        ConversationStep::Introduction => {
            "Welcome to your personal AI journey! I'm excited to create something uniquely yours. What sparked your interest in exploring AI today? I'd love to understand your perspective."
        }
        ConversationStep::ColorPreference => {
            "Colors speak to us on an emotional level and help shape our digital environment. Which color creates the perfect atmosphere for your AI experience? This will influence how your personalized space feels."
        }
        ConversationStep::Values => {
            "Your values are the foundation of a meaningful AI relationship. What principles matter most to you? Privacy? Innovation? Transparency? Efficiency? Creativity? These will guide how your AI experience evolves."
        }
        ConversationStep::Goals => {
            "Let's align your AI experience with your aspirations. What specific outcomes are you hoping to achieve? Whether it's enhancing productivity, sparking creativity, or something entirely different - I'll tailor everything to support your unique goals."
        }
        ConversationStep::PrivacyConsent => {
            "Naible keeps your answers on this device. May we store your preferences locally to personalize your experience?"
        }
        ConversationStep::SiteAssembly | ConversationStep::PersonalizedHero => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_steps_have_copy() {
        for step in [
            ConversationStep::Introduction,
            ConversationStep::ColorPreference,
            ConversationStep::Values,
            ConversationStep::Goals,
        ] {
            assert!(!question(step).is_empty(), "{step} has no question");
        }
        assert!(question(ConversationStep::PersonalizedHero).is_empty());
    }
}
