//! Conversation steps and the responses each one accepts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A stage of the onboarding conversation, in flow order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConversationStep {
    PrivacyConsent,
    Introduction,
    ColorPreference,
    Values,
    Goals,
    SiteAssembly,
    PersonalizedHero,
}

impl ConversationStep {
    /// Step the flow starts at, given the recorded consent.
    pub fn initial(consent_recorded: bool) -> Self {
        if consent_recorded {
            Self::Introduction
        } else {
            Self::PrivacyConsent
        }
    }

    /// Position among the question steps (colour = 2, values = 3, goals = 4),
    /// as shown in the progress indicator.
    pub fn question_index(self) -> Option<usize> {
        match self {
            Self::Introduction => Some(1),
            Self::ColorPreference => Some(2),
            Self::Values => Some(3),
            Self::Goals => Some(4),
            _ => None,
        }
    }
}

/// Total number of question steps in the progress indicator.
pub const TOTAL_QUESTION_STEPS: usize = 4;

/// A user's response to the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StepResponse {
    /// Accept or decline the privacy notice.
    Consent(bool),
    /// Start the conversation from the introduction screen.
    Start,
    /// Free-text (typed or transcribed) answer.
    Answer(String),
}

impl StepResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Consent(_) => "consent",
            Self::Start => "start",
            Self::Answer(_) => "answer",
        }
    }
}
