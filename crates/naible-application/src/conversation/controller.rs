use std::sync::Arc;
use std::time::Duration;

use naible_core::accessibility::AccessibilitySettings;
use naible_core::config::{DEFAULT_ASSEMBLY_DELAY_MS, FlowSettings};
use naible_core::content::PersonalizedContent;
use naible_core::conversation::{self, ConversationStep, StepResponse, TOTAL_QUESTION_STEPS};
use naible_core::generation::ContentGenerator;
use naible_core::{GeneratedTheme, NaibleError, Result, UserPreferences};
use serde::Serialize;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;

use super::timer::{StepTimer, TokioStepTimer};
use crate::personalization::PersonalizationService;
use crate::privacy::PrivacyService;

/// Timing knobs for the controller.
#[derive(Clone)]
pub struct ControllerOptions {
    /// How long `site_assembly` lasts before `personalized_hero`.
    pub assembly_delay: Duration,
    pub timer: Arc<dyn StepTimer>,
}

impl ControllerOptions {
    pub fn from_flow(flow: &FlowSettings) -> Self {
        Self {
            assembly_delay: Duration::from_millis(flow.assembly_delay_ms),
            ..Self::default()
        }
    }

    pub fn with_timer(mut self, timer: Arc<dyn StepTimer>) -> Self {
        self.timer = timer;
        self
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            assembly_delay: Duration::from_millis(DEFAULT_ASSEMBLY_DELAY_MS),
            timer: Arc::new(TokioStepTimer),
        }
    }
}

/// Everything a presentation client needs to render the current step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSnapshot {
    pub step: ConversationStep,
    pub question: String,
    pub question_index: Option<usize>,
    pub total_questions: usize,
    pub consent: Option<bool>,
    pub preferences: UserPreferences,
    pub content: Option<PersonalizedContent>,
    pub theme: GeneratedTheme,
    pub accessibility: AccessibilitySettings,
}

struct ControllerState {
    step: RwLock<ConversationStep>,
    /// Serializes transitions, including the timer-driven one.
    transition: Mutex<()>,
    hero_ready: Notify,
    personalization: Arc<PersonalizationService>,
    generator: Arc<dyn ContentGenerator>,
    timer: Arc<dyn StepTimer>,
    assembly_delay: Duration,
}

impl ControllerState {
    async fn finish_assembly(&self) {
        let _transition = self.transition.lock().await;
        {
            let mut step = self.step.write().await;
            if *step == ConversationStep::SiteAssembly {
                *step = ConversationStep::PersonalizedHero;
                tracing::info!("[Conversation] Site assembled, showing personalized hero");
            }
        }
        self.hero_ready.notify_waiters();
    }
}

/// Drives the onboarding conversation.
///
/// The step is held in memory only; on construction the flow starts at
/// `introduction` when consent was previously accepted, otherwise at
/// `privacy_consent`. The pending site-assembly timer is aborted when the
/// controller is dropped.
pub struct ConversationController {
    state: Arc<ControllerState>,
    assembly_task: Mutex<Option<JoinHandle<()>>>,
}

impl ConversationController {
    pub fn new(
        personalization: Arc<PersonalizationService>,
        generator: Arc<dyn ContentGenerator>,
        options: ControllerOptions,
    ) -> Result<Self> {
        let step = ConversationStep::initial(personalization.store().consent()? == Some(true));
        tracing::info!(step = %step, "[Conversation] Starting conversation");

        Ok(Self {
            state: Arc::new(ControllerState {
                step: RwLock::new(step),
                transition: Mutex::new(()),
                hero_ready: Notify::new(),
                personalization,
                generator,
                timer: options.timer,
                assembly_delay: options.assembly_delay,
            }),
            assembly_task: Mutex::new(None),
        })
    }

    pub fn personalization(&self) -> &Arc<PersonalizationService> {
        &self.state.personalization
    }

    pub async fn current_step(&self) -> ConversationStep {
        *self.state.step.read().await
    }

    /// Prompt copy for `step`.
    pub fn question(&self, step: ConversationStep) -> &'static str {
        conversation::question(step)
    }

    /// Applies `response` to `step`, which must be the current step.
    ///
    /// # Returns
    ///
    /// The step the conversation is at afterwards. Declining consent
    /// returns `privacy_consent` again.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` for a stale step or a response the step does not accept
    /// - `Validation` for a blank answer
    /// - storage errors while persisting the answer
    pub async fn advance(
        &self,
        step: ConversationStep,
        response: StepResponse,
    ) -> Result<ConversationStep> {
        let _transition = self.state.transition.lock().await;

        let current = self.current_step().await;
        if step != current {
            return Err(NaibleError::invalid_transition(
                current,
                format!("stale step '{step}'"),
            ));
        }

        let personalization = &self.state.personalization;
        let next = match (current, response) {
            (ConversationStep::PrivacyConsent, StepResponse::Consent(accepted)) => {
                personalization.store().record_consent(accepted)?;
                if accepted {
                    tracing::info!("[Conversation] Privacy consent accepted");
                    ConversationStep::Introduction
                } else {
                    tracing::info!("[Conversation] Privacy consent declined");
                    ConversationStep::PrivacyConsent
                }
            }
            (ConversationStep::Introduction, StepResponse::Start | StepResponse::Answer(_)) => {
                ConversationStep::ColorPreference
            }
            (ConversationStep::ColorPreference, StepResponse::Answer(answer)) => {
                let color = self.require_answer(current, &answer)?;
                personalization.update_preferences(|p| p.color = color)?;
                ConversationStep::Values
            }
            (ConversationStep::Values, StepResponse::Answer(answer)) => {
                let values = self.require_answer(current, &answer)?;
                personalization.update_preferences(|p| p.values = values)?;
                ConversationStep::Goals
            }
            (ConversationStep::Goals, StepResponse::Answer(answer)) => {
                let goal = self.require_answer(current, &answer)?;
                let mut preferences = personalization.preferences()?;
                preferences.goal = goal;
                let content = self.state.generator.generate(&preferences).await;
                personalization.save_goal_with_content(&preferences.goal, &content)?;
                ConversationStep::SiteAssembly
            }
            (current, response) => {
                return Err(NaibleError::invalid_transition(
                    current,
                    format!("'{}' response is not accepted here", response.kind()),
                ));
            }
        };

        *self.state.step.write().await = next;
        tracing::debug!(from = %current, to = %next, "[Conversation] Advanced");

        if next == ConversationStep::SiteAssembly {
            self.schedule_assembly().await;
        }
        Ok(next)
    }

    /// Waits until the pending site assembly completes.
    ///
    /// Returns immediately at `personalized_hero`; fails at any step other
    /// than `site_assembly`.
    pub async fn wait_for_hero(&self) -> Result<()> {
        loop {
            let notified = self.state.hero_ready.notified();
            match self.current_step().await {
                ConversationStep::PersonalizedHero => return Ok(()),
                ConversationStep::SiteAssembly => notified.await,
                other => {
                    return Err(NaibleError::invalid_transition(
                        other,
                        "no site assembly is pending",
                    ));
                }
            }
        }
    }

    /// Returns to the initial step, cancelling any pending assembly.
    pub async fn reset(&self) -> Result<ConversationStep> {
        let _transition = self.state.transition.lock().await;
        self.reset_locked().await
    }

    /// Deletes the stored user data, then resets.
    ///
    /// Holds the transition lock throughout, so an advance that is still
    /// generating content completes first and its writes are deleted too.
    pub async fn forget(&self, privacy: &PrivacyService) -> Result<ConversationStep> {
        let _transition = self.state.transition.lock().await;
        privacy.delete_all()?;
        self.reset_locked().await
    }

    async fn reset_locked(&self) -> Result<ConversationStep> {
        if let Some(task) = self.assembly_task.lock().await.take() {
            task.abort();
        }

        let consent = self.state.personalization.store().consent()?;
        let step = ConversationStep::initial(consent == Some(true));
        *self.state.step.write().await = step;
        self.state.hero_ready.notify_waiters();
        tracing::info!(step = %step, "[Conversation] Reset");
        Ok(step)
    }

    pub async fn snapshot(&self) -> Result<ConversationSnapshot> {
        let step = self.current_step().await;
        let personalization = &self.state.personalization;

        Ok(ConversationSnapshot {
            step,
            question: conversation::question(step).to_string(),
            question_index: step.question_index(),
            total_questions: TOTAL_QUESTION_STEPS,
            consent: personalization.store().consent()?,
            preferences: personalization.preferences()?,
            content: personalization.content()?,
            theme: personalization.theme()?,
            accessibility: personalization.accessibility()?,
        })
    }

    fn require_answer(&self, step: ConversationStep, answer: &str) -> Result<String> {
        if self.state.personalization.store().consent()? != Some(true) {
            return Err(NaibleError::invalid_transition(
                step,
                "privacy consent has not been accepted",
            ));
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(NaibleError::validation(format!(
                "An answer is required at step '{step}'"
            )));
        }
        Ok(answer.to_string())
    }

    async fn schedule_assembly(&self) {
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            state.timer.wait(state.assembly_delay).await;
            state.finish_assembly().await;
        });

        if let Some(previous) = self.assembly_task.lock().await.replace(task) {
            previous.abort();
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        if let Some(task) = self.assembly_task.get_mut().take() {
            task.abort();
        }
    }
}
