//! Content suggestions shown next to the personalised hero.

use std::sync::Arc;

use naible_core::UserPreferences;
use naible_core::selector::VariantSelector;
use serde::Serialize;

/// Always shown, in this order.
pub const PRIORITY_SUGGESTIONS: [&str; 5] = [
    "Context-aware reminders",
    "Adaptive learning models",
    "AI workflow automation",
    "Personalized knowledge graphs",
    "Neural interface customization",
];

const CATALOGUE: [&str; 28] = [
    // Privacy
    "Data ownership controls",
    "Privacy-first AI assistants",
    "Secure data vaults",
    "Encrypted AI training",
    "Zero-knowledge proof systems",
    "Federated learning models",
    "Local-only processing options",
    // Personalization
    "Custom AI personalities",
    "Personalized content filters",
    "Tailored recommendation engines",
    "Adaptive UI/UX systems",
    "Preference learning algorithms",
    "Behavioral pattern recognition",
    "Contextual awareness features",
    // Productivity
    "Smart task prioritization",
    "Intelligent scheduling",
    "Workflow optimization tools",
    "Focus enhancement systems",
    "Automated report generation",
    "Meeting summarization",
    "Decision support frameworks",
    // Creative
    "AI-enhanced creativity tools",
    "Collaborative content creation",
    "Style-matching writing assistance",
    "Visual concept generation",
    "Multimodal content synthesis",
    "Creative prompt engineering",
    "Inspiration recommendation systems",
];

/// Value keywords and the title fragments they keep.
const VALUE_FILTERS: [(&[&str], &[&str]); 3] = [
    (&["privacy", "security"], &["privacy", "secure", "encrypt", "data"]),
    (
        &["productivity", "efficiency"],
        &["workflow", "task", "schedule", "automation"],
    ),
    (
        &["creativity", "innovation"],
        &["creative", "creation", "generation", "writing"],
    ),
];

const MIN_EXTRA: usize = 2;
const EXTRA_SPREAD: usize = 3;

const DESCRIPTIONS: [(&str, &str); 33] = [
    ("Context-aware reminders", "Intelligent reminders that adapt based on your location, schedule, and past behavior patterns. They understand when and how you prefer to be reminded about different types of tasks."),
    ("Adaptive learning models", "AI systems that continuously evolve based on your interactions, becoming more accurate and personalized over time. These models identify patterns in your preferences and adjust accordingly."),
    ("AI workflow automation", "Smart systems that learn your regular processes and automate repetitive tasks, saving you time while maintaining your preferred methods and standards."),
    ("Personalized knowledge graphs", "Custom information networks that connect concepts based on your unique understanding and interests, creating a personalized knowledge structure."),
    ("Neural interface customization", "Advanced AI interfaces that adapt their communication style, complexity level, and presentation format based on your cognitive preferences."),
    ("Data ownership controls", "Comprehensive tools that give you complete control over how your data is stored, used, and shared, with granular permission settings."),
    ("Privacy-first AI assistants", "AI helpers designed with privacy as the core principle, processing sensitive information locally and minimizing data transmission."),
    ("Secure data vaults", "Encrypted storage systems for your personal data with multi-factor authentication and complete user control over access permissions."),
    ("Encrypted AI training", "Methods for training AI on your data while keeping that information encrypted, ensuring privacy even during the learning process."),
    ("Zero-knowledge proof systems", "Cryptographic methods that allow AI to verify information without actually seeing the underlying data, preserving complete privacy."),
    ("Federated learning models", "Distributed learning approaches where AI improves by learning patterns across many devices without centralizing or sharing the actual data."),
    ("Local-only processing options", "AI capabilities that run entirely on your device, ensuring your data never leaves your personal hardware."),
    ("Custom AI personalities", "Assistants with adjustable personality traits that match your communication preferences and work style for more natural interactions."),
    ("Personalized content filters", "Smart filters that learn your preferences to highlight relevant information and reduce noise based on your interests and goals."),
    ("Tailored recommendation engines", "Systems that suggest content, products, or actions based on your unique preference patterns rather than generic algorithms."),
    ("Adaptive UI/UX systems", "Interfaces that reorganize and adjust based on how you use them, creating a more intuitive experience tailored to your workflow."),
    ("Preference learning algorithms", "Advanced systems that identify your preferences through both explicit choices and implicit behavior patterns."),
    ("Behavioral pattern recognition", "AI that identifies your unique habits and routines to provide more relevant assistance at the right moments."),
    ("Contextual awareness features", "Systems that understand your current situation and adjust their behavior based on time, location, and ongoing activities."),
    ("Smart task prioritization", "AI that learns how you prioritize work and helps organize tasks according to your personal values and deadlines."),
    ("Intelligent scheduling", "Calendar systems that understand your energy patterns, focus times, and preferences to optimize your schedule."),
    ("Workflow optimization tools", "AI assistants that analyze your work patterns and suggest improvements while respecting your preferred methods."),
    ("Focus enhancement systems", "Tools that create optimal conditions for concentration based on your personal focus triggers and distraction patterns."),
    ("Automated report generation", "Systems that compile and format information according to your preferences and communication style."),
    ("Meeting summarization", "AI that captures the key points from conversations based on what you typically find most relevant or actionable."),
    ("Decision support frameworks", "Tools that help evaluate options based on your personal values, risk tolerance, and decision-making style."),
    ("AI-enhanced creativity tools", "Systems that amplify your creative process by understanding your aesthetic preferences and creative patterns."),
    ("Collaborative content creation", "AI partners that adapt to your creative style and help generate content that matches your unique voice."),
    ("Style-matching writing assistance", "Writing tools that learn your tone, vocabulary, and sentence structure to suggest text that sounds authentically like you."),
    ("Visual concept generation", "AI that creates images and designs aligned with your aesthetic preferences and visual style."),
    ("Multimodal content synthesis", "Tools that combine text, images, and other media in ways that match your communication and presentation style."),
    ("Creative prompt engineering", "Systems that generate inspiring starting points tailored to your creative process and interests."),
    ("Inspiration recommendation systems", "AI that suggests creative influences and references based on your taste and current projects."),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
}

impl Suggestion {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: describe(title),
        }
    }
}

/// Detailed description for a suggestion title, with a generic fallback.
pub fn describe(title: &str) -> String {
    DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == title)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| {
            format!(
                "{title} is a personalized AI capability that adapts to your unique preferences and needs, providing a tailored experience that evolves with you over time."
            )
        })
}

/// Catalogue entries matching every value group present in `values`.
///
/// Falls back to the whole catalogue when the filters leave nothing.
fn candidates(values: &str) -> Vec<&'static str> {
    let values = values.to_lowercase();
    let mut pool: Vec<&'static str> = CATALOGUE.to_vec();

    for (keywords, fragments) in VALUE_FILTERS {
        if keywords.iter().any(|k| values.contains(k)) {
            pool.retain(|title| {
                let title = title.to_lowercase();
                fragments.iter().any(|f| title.contains(f))
            });
        }
    }

    if pool.is_empty() {
        CATALOGUE.to_vec()
    } else {
        pool
    }
}

pub struct SuggestionEngine {
    selector: Arc<dyn VariantSelector>,
}

impl SuggestionEngine {
    pub fn new(selector: Arc<dyn VariantSelector>) -> Self {
        Self { selector }
    }

    /// The priority suggestions followed by two to four extras drawn from
    /// the value-filtered catalogue.
    pub fn suggest(&self, preferences: &UserPreferences) -> Vec<Suggestion> {
        let mut pool = candidates(&preferences.values);
        let extra = (MIN_EXTRA + self.selector.select(EXTRA_SPREAD)).min(pool.len());

        let mut suggestions: Vec<Suggestion> =
            PRIORITY_SUGGESTIONS.iter().map(|t| Suggestion::new(t)).collect();
        for _ in 0..extra {
            let title = pool.remove(self.selector.select(pool.len()));
            suggestions.push(Suggestion::new(title));
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naible_core::selector::{FixedSelector, RandomSelector};

    fn prefs(values: &str) -> UserPreferences {
        UserPreferences {
            values: values.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_privacy_values_filter_catalogue() {
        let pool = candidates("Privacy, Security");
        assert_eq!(
            pool,
            vec![
                "Data ownership controls",
                "Privacy-first AI assistants",
                "Secure data vaults",
                "Encrypted AI training",
            ]
        );
    }

    #[test]
    fn test_conflicting_filters_fall_back_to_catalogue() {
        assert_eq!(candidates("privacy, productivity").len(), CATALOGUE.len());
        assert_eq!(candidates("").len(), CATALOGUE.len());
    }

    #[test]
    fn test_suggest_with_fixed_selector() {
        let engine = SuggestionEngine::new(Arc::new(FixedSelector(0)));
        let suggestions = engine.suggest(&prefs("privacy"));

        let titles: Vec<_> = suggestions.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(&titles[..5], &PRIORITY_SUGGESTIONS);
        assert_eq!(
            &titles[5..],
            &["Data ownership controls", "Privacy-first AI assistants"]
        );
    }

    #[test]
    fn test_random_extras_stay_in_range_and_unique() {
        let engine = SuggestionEngine::new(Arc::new(RandomSelector));
        for _ in 0..50 {
            let suggestions = engine.suggest(&prefs("creativity"));
            assert!((7..=9).contains(&suggestions.len()));
            let mut titles: Vec<_> = suggestions.iter().map(|s| &s.title).collect();
            titles.sort();
            titles.dedup();
            assert_eq!(titles.len(), suggestions.len());
        }
    }

    #[test]
    fn test_describe_falls_back_to_generic_copy() {
        assert!(describe("Secure data vaults").starts_with("Encrypted storage systems"));
        assert!(describe("Quantum gardening").starts_with(
            "Quantum gardening is a personalized AI capability"
        ));
    }
}
