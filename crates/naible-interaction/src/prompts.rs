//! Prompt templates for hero-copy generation.

use minijinja::{Environment, context};
use naible_core::{NaibleError, Result, UserPreferences};

/// System instruction describing Naible and the expected JSON reply.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant for Naible, a company focused on personal intelligence. Naible helps users own their AI experience through private, continuously learning AI that each user trains themselves. Key differentiators include user data ownership, persistent context, and custom 'DNAi' that enables each AI instance to become the user's personal twin over time. Based on the user's preferences, generate personalized content that aligns with their goals and values. Format your response as JSON with the following structure: {\"headline\": \"A compelling headline that speaks to the user's goals\", \"subheading\": \"A subheading that elaborates on the headline and mentions the user's values\", \"ctaText\": \"Call-to-action text that encourages the user to take the next step\", \"welcomeMessage\": \"A personalized welcome message that makes the user feel understood\"}";

const CONTENT_TEMPLATE: &str = "content";
const PROCESS_TEMPLATE: &str = "process";

const CONTENT_SOURCE: &str = "\
Based on the user's preferences:
- Color: {{ color or 'Not specified' }}
- Values: {{ values or 'Not specified' }}
- Goal: {{ goal }}

Generate a personalized hero section with:
1. An engaging headline (5-8 words) that connects AI with their goals
2. A compelling subheading (15-20 words) that emphasizes how Naible's personal intelligence aligns with their values
3. A call-to-action text (3-5 words) that creates urgency and excitement
4. A personalized welcome message (1 sentence) that makes them feel seen and understood

Make the content feel tailored specifically to this user's unique combination of preferences.";

const PROCESS_SOURCE: &str = "Generate personalized content for a user with these preferences: {{ preferences }}. Their prompt: {{ prompt }}";

/// Compiled prompt templates.
pub struct PromptTemplates {
    env: Environment<'static>,
}

impl PromptTemplates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(CONTENT_TEMPLATE, CONTENT_SOURCE)
            .map_err(template_error)?;
        env.add_template(PROCESS_TEMPLATE, PROCESS_SOURCE)
            .map_err(template_error)?;
        Ok(Self { env })
    }

    /// User message asking for a hero block.
    pub fn content_prompt(&self, preferences: &UserPreferences) -> Result<String> {
        self.env
            .get_template(CONTENT_TEMPLATE)
            .and_then(|t| {
                t.render(context! {
                    color => preferences.color.trim(),
                    values => preferences.values.trim(),
                    goal => preferences.goal.trim(),
                })
            })
            .map_err(template_error)
    }

    /// User message for a free-form prompt, with the preferences embedded as JSON.
    pub fn process_prompt(&self, prompt: &str, preferences: &UserPreferences) -> Result<String> {
        let preferences = serde_json::to_string(preferences)?;
        self.env
            .get_template(PROCESS_TEMPLATE)
            .and_then(|t| t.render(context! { preferences, prompt }))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> NaibleError {
    NaibleError::internal(format!("Prompt template error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_prompt_embeds_preferences() {
        let templates = PromptTemplates::new().unwrap();
        let prompt = templates
            .content_prompt(&UserPreferences {
                color: "#ff0000".into(),
                values: "privacy, security".into(),
                goal: "exploring AI for my business".into(),
                ..Default::default()
            })
            .unwrap();

        assert!(prompt.contains("- Color: #ff0000"));
        assert!(prompt.contains("- Values: privacy, security"));
        assert!(prompt.contains("- Goal: exploring AI for my business"));
        assert!(prompt.ends_with("unique combination of preferences."));
    }

    #[test]
    fn test_blank_answers_render_not_specified() {
        let templates = PromptTemplates::new().unwrap();
        let prompt = templates
            .content_prompt(&UserPreferences {
                color: String::new(),
                ..Default::default()
            })
            .unwrap();
        assert!(prompt.contains("- Color: Not specified"));
        assert!(prompt.contains("- Values: Not specified"));
    }

    #[test]
    fn test_process_prompt_is_not_html_escaped() {
        let templates = PromptTemplates::new().unwrap();
        let prompt = templates
            .process_prompt("make it \"bold\"", &UserPreferences::default())
            .unwrap();
        assert!(prompt.starts_with(
            "Generate personalized content for a user with these preferences: {\"color\":\"#4F46E5\""
        ));
        assert!(prompt.ends_with("Their prompt: make it \"bold\""));
    }
}
