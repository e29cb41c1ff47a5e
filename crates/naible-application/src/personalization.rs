//! Personalization service.
//!
//! Owns the stored preferences and keeps the published theme in step with
//! them: every mutation recomputes the theme tokens (with the accessibility
//! overlay) and hands them to the [`ThemeSink`].

use std::sync::Arc;

use naible_core::accessibility::{AccessibilityFlag, AccessibilitySettings};
use naible_core::content::PersonalizedContent;
use naible_core::storage::PreferenceStore;
use naible_core::theme::{ThemeSink, ThemeTokens};
use naible_core::{GeneratedTheme, Result, UserPreferences, generate_theme};

pub struct PersonalizationService {
    store: PreferenceStore,
    sink: Arc<dyn ThemeSink>,
}

impl PersonalizationService {
    pub fn new(store: PreferenceStore, sink: Arc<dyn ThemeSink>) -> Self {
        Self { store, sink }
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn preferences(&self) -> Result<UserPreferences> {
        self.store.load_preferences()
    }

    pub fn content(&self) -> Result<Option<PersonalizedContent>> {
        self.store.load_content()
    }

    /// Theme derived from the stored preferences.
    pub fn theme(&self) -> Result<GeneratedTheme> {
        let preferences = self.store.load_preferences()?;
        Ok(generate_theme(
            preferences.effective_color(),
            &preferences.values,
        ))
    }

    /// Theme tokens with the accessibility overlay applied.
    pub fn tokens(&self) -> Result<ThemeTokens> {
        let accessibility = self.store.accessibility()?;
        Ok(self.theme()?.tokens().with_accessibility(&accessibility))
    }

    /// Recomputes the tokens and publishes them to the sink.
    pub fn publish(&self) -> Result<ThemeTokens> {
        let tokens = self.tokens()?;
        self.sink.publish(&tokens);
        tracing::debug!(tokens = tokens.len(), "[Theme] Published theme tokens");
        Ok(tokens)
    }

    /// Applies `update` to the stored preferences, saves them and republishes
    /// the theme.
    pub fn update_preferences<F>(&self, update: F) -> Result<UserPreferences>
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut preferences = self.store.load_preferences()?;
        update(&mut preferences);
        self.store.save_preferences(&preferences)?;
        self.publish()?;
        Ok(preferences)
    }

    /// Stores the goal answer together with the content generated for it.
    ///
    /// The content is written first. If the goal cannot be saved, the
    /// previous content is put back and the error returned, so either both
    /// records change or neither does.
    pub fn save_goal_with_content(
        &self,
        goal: &str,
        content: &PersonalizedContent,
    ) -> Result<UserPreferences> {
        let mut preferences = self.store.load_preferences()?;
        preferences.goal = goal.to_string();

        let previous = self.store.load_content()?;
        self.store.save_content(content)?;
        if let Err(e) = self.store.save_preferences(&preferences) {
            let restored = match &previous {
                Some(previous) => self.store.save_content(previous),
                None => self.store.remove_content(),
            };
            if let Err(restore_error) = restored {
                tracing::error!(error = %restore_error, "[Personalization] Failed to roll back content");
            }
            return Err(e);
        }

        self.publish()?;
        Ok(preferences)
    }

    pub fn accessibility(&self) -> Result<AccessibilitySettings> {
        self.store.accessibility()
    }

    /// Flips `flag`, persists it and republishes the theme.
    pub fn toggle_accessibility(&self, flag: AccessibilityFlag) -> Result<AccessibilitySettings> {
        let mut settings = self.store.accessibility()?;
        let enabled = settings.toggle(flag);
        self.store.set_accessibility_flag(flag, enabled)?;
        tracing::info!(flag = %flag, enabled, "[Accessibility] Flag toggled");
        self.publish()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naible_core::storage::MemoryKeyValueStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<String>>,
    }

    impl ThemeSink for RecordingSink {
        fn publish(&self, tokens: &ThemeTokens) {
            self.published.lock().unwrap().push(tokens.to_css());
        }
    }

    fn service() -> (Arc<RecordingSink>, PersonalizationService) {
        let sink = Arc::new(RecordingSink::default());
        let store = PreferenceStore::new(Arc::new(MemoryKeyValueStore::new()));
        (sink.clone(), PersonalizationService::new(store, sink))
    }

    #[test]
    fn test_update_preferences_publishes_theme() {
        let (sink, service) = service();
        service
            .update_preferences(|p| p.color = "#ff0000".to_string())
            .unwrap();

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].contains("--color-primary: #ff0000;"));
        assert_eq!(service.preferences().unwrap().color, "#ff0000");
    }

    #[test]
    fn test_goal_and_content_are_saved_together() {
        let (sink, service) = service();
        let preferences = service
            .save_goal_with_content("ship faster", &PersonalizedContent::fallback(2))
            .unwrap();

        assert_eq!(preferences.goal, "ship faster");
        assert_eq!(service.preferences().unwrap().goal, "ship faster");
        assert_eq!(
            service.content().unwrap(),
            Some(PersonalizedContent::fallback(2))
        );
        assert_eq!(sink.published.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_theme_uses_default_colour_when_nothing_stored() {
        let (_, service) = service();
        let theme = service.theme().unwrap();
        assert_eq!(theme, GeneratedTheme::default());
    }

    #[test]
    fn test_toggle_accessibility_overlays_tokens() {
        let (sink, service) = service();
        let settings = service
            .toggle_accessibility(AccessibilityFlag::LargeText)
            .unwrap();
        assert!(settings.large_text);
        assert_eq!(service.tokens().unwrap().get("--base-size"), Some("1.25rem"));
        assert!(sink.published.lock().unwrap()[0].contains("--base-size: 1.25rem;"));

        let settings = service
            .toggle_accessibility(AccessibilityFlag::LargeText)
            .unwrap();
        assert!(!settings.large_text);
        assert_eq!(service.tokens().unwrap().get("--base-size"), Some("1rem"));
    }
}
