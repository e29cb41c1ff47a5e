//! Shared handler state.

use std::sync::Arc;

use naible_application::{
    ChatAssistant, ControllerOptions, ConversationController, PersonalizationService,
    PrivacyService, SuggestionEngine, UserService,
};
use naible_core::Result;
use naible_core::generation::{PromptProcessor, Transcriber};
use naible_core::selector::VariantSelector;
use naible_core::storage::{KeyValueStore, PreferenceStore};
use naible_interaction::LlmContentGenerator;

use crate::hero::HeroRenderer;
use crate::theme_sink::StylesheetSink;

/// Inputs needed to wire the services together.
pub struct StateParts {
    pub store: Arc<dyn KeyValueStore>,
    pub generator: Arc<LlmContentGenerator>,
    /// `None` when no speech-to-text backend is configured.
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Picks chat replies and suggestion extras.
    pub selector: Arc<dyn VariantSelector>,
    pub controller: ControllerOptions,
}

pub struct AppState {
    pub controller: ConversationController,
    pub personalization: Arc<PersonalizationService>,
    pub users: UserService,
    pub privacy: PrivacyService,
    pub suggestions: SuggestionEngine,
    pub assistant: ChatAssistant,
    pub processor: Arc<dyn PromptProcessor>,
    pub transcriber: Option<Arc<dyn Transcriber>>,
    pub stylesheet: Arc<StylesheetSink>,
    pub hero: HeroRenderer,
}

impl AppState {
    /// Wires every service over one key/value store.
    pub fn assemble(parts: StateParts) -> Result<Self> {
        let store = PreferenceStore::new(parts.store);
        let stylesheet = Arc::new(StylesheetSink::new());
        let personalization = Arc::new(PersonalizationService::new(
            store.clone(),
            stylesheet.clone(),
        ));
        let controller = ConversationController::new(
            personalization.clone(),
            parts.generator.clone(),
            parts.controller,
        )?;

        Ok(Self {
            controller,
            personalization,
            users: UserService::new(store.clone()),
            privacy: PrivacyService::new(store),
            suggestions: SuggestionEngine::new(parts.selector.clone()),
            assistant: ChatAssistant::new(parts.selector),
            processor: parts.generator,
            transcriber: parts.transcriber,
            stylesheet,
            hero: HeroRenderer::new()?,
        })
    }

    /// Current stylesheet, publishing one first if nothing has been yet.
    pub fn stylesheet_css(&self) -> Result<String> {
        let css = self.stylesheet.css();
        if !css.is_empty() {
            return Ok(css);
        }
        Ok(self.personalization.publish()?.to_css())
    }
}
