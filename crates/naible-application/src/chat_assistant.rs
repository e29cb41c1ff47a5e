//! Keyword-routed replies for the chat bubble.

use std::sync::Arc;

use naible_core::UserPreferences;
use naible_core::selector::{VariantSelector, pick};
use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern is valid"));

const DEFAULT_REPLIES: [&str; 4] = [
    "That's an interesting point. Would you like to know more about how Naible's personal intelligence can help with that?",
    "I understand. Naible's approach to AI is centered around personalization and privacy.",
    "Great question! Naible's personal intelligence adapts to your specific needs and preferences.",
    "I see what you mean. The personal AI experience at Naible is designed to evolve with you over time.",
];

pub struct ChatAssistant {
    selector: Arc<dyn VariantSelector>,
}

impl ChatAssistant {
    pub fn new(selector: Arc<dyn VariantSelector>) -> Self {
        Self { selector }
    }

    /// Opening message of a chat.
    pub fn greeting(name: Option<&str>) -> String {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("there");
        format!("Hi {name}! I'm your personal AI assistant. How can I help you today?")
    }

    /// Replies to `message`; the first matching keyword wins.
    pub fn reply(&self, message: &str, preferences: &UserPreferences) -> String {
        let message = message.to_lowercase();
        let words: Vec<&str> = WORD.find_iter(&message).map(|m| m.as_str()).collect();
        // Greetings must be whole words; topics also match as a word prefix ("goals").
        let greeted = |keyword: &str| words.contains(&keyword);
        let mentions = |keyword: &str| words.iter().any(|word| word.starts_with(keyword));
        let known = |field: &str| !field.trim().is_empty();

        if greeted("hello") || greeted("hi") {
            return "Hello! How can I assist you today?".to_string();
        }
        if mentions("help") {
            return "I'm here to help! I can answer questions about Naible's personal intelligence platform, discuss AI topics, or just chat.".to_string();
        }
        if mentions("color") && known(&preferences.color) {
            return format!(
                "I see you prefer {}. It's a great choice that reflects your personality!",
                preferences.color
            );
        }
        if mentions("values") && known(&preferences.values) {
            return format!(
                "Based on your values ({}), I can help you find AI solutions that align with what matters to you.",
                preferences.values
            );
        }
        if mentions("goal") && known(&preferences.goal) {
            return format!(
                "Your goal of \"{}\" is something Naible's personal intelligence can definitely help with.",
                preferences.goal
            );
        }
        if mentions("naible") {
            return "Naible is focused on personal intelligence - AI that's private, continuously learning, and trained by you. It's designed to be your personal AI twin over time.".to_string();
        }
        if mentions("privacy") || mentions("data") {
            return "Privacy is central to Naible's approach. Your data remains yours, and you control how your personal AI learns and evolves.".to_string();
        }

        pick(self.selector.as_ref(), &DEFAULT_REPLIES)
            .copied()
            .unwrap_or(DEFAULT_REPLIES[0])
            .to_string()
    }
}
