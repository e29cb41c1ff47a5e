//! Typed access to the persisted onboarding records.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use strum::IntoEnumIterator;

use super::{KeyValueStore, keys};
use crate::accessibility::{AccessibilityFlag, AccessibilitySettings};
use crate::content::PersonalizedContent;
use crate::error::Result;
use crate::preferences::UserPreferences;
use crate::user::AnonymousUser;

/// Everything a user can export or delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredUserData {
    pub user: Option<AnonymousUser>,
    pub preferences: Option<UserPreferences>,
    pub content: Option<PersonalizedContent>,
}

/// Typed repository over a [`KeyValueStore`].
///
/// Malformed records are logged and treated as absent, so a corrupted
/// entry never blocks the flow.
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "[Storage] Ignoring malformed record");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    fn read_flag(&self, key: &str) -> Result<Option<bool>> {
        Ok(match self.store.get(key)?.as_deref().map(str::trim) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(other) => {
                tracing::warn!(key, value = other, "[Storage] Ignoring malformed flag");
                None
            }
            None => None,
        })
    }

    fn write_flag(&self, key: &str, value: bool) -> Result<()> {
        self.store.set(key, if value { "true" } else { "false" })
    }

    // ============================================================================
    // Preferences and content
    // ============================================================================

    /// Stored preferences, or defaults when absent.
    pub fn load_preferences(&self) -> Result<UserPreferences> {
        Ok(self
            .read_json(keys::USER_PREFERENCES)?
            .unwrap_or_default())
    }

    pub fn save_preferences(&self, preferences: &UserPreferences) -> Result<()> {
        self.write_json(keys::USER_PREFERENCES, preferences)
    }

    pub fn load_content(&self) -> Result<Option<PersonalizedContent>> {
        self.read_json(keys::PERSONALIZED_CONTENT)
    }

    pub fn save_content(&self, content: &PersonalizedContent) -> Result<()> {
        self.write_json(keys::PERSONALIZED_CONTENT, content)
    }

    pub fn remove_content(&self) -> Result<()> {
        self.store.remove(keys::PERSONALIZED_CONTENT)
    }

    // ============================================================================
    // Consent
    // ============================================================================

    /// `Some(true)` once accepted, `Some(false)` once declined, `None` if never asked.
    pub fn consent(&self) -> Result<Option<bool>> {
        self.read_flag(keys::PRIVACY_CONSENT)
    }

    pub fn record_consent(&self, accepted: bool) -> Result<()> {
        self.write_flag(keys::PRIVACY_CONSENT, accepted)
    }

    // ============================================================================
    // Anonymous user
    // ============================================================================

    pub fn load_user(&self) -> Result<Option<AnonymousUser>> {
        self.read_json(keys::USER)
    }

    pub fn save_user(&self, user: &AnonymousUser) -> Result<()> {
        self.write_json(keys::USER, user)
    }

    pub fn remove_user(&self) -> Result<()> {
        self.store.remove(keys::USER)
    }

    // ============================================================================
    // Accessibility
    // ============================================================================

    pub fn accessibility(&self) -> Result<AccessibilitySettings> {
        let mut settings = AccessibilitySettings::default();
        for flag in AccessibilityFlag::iter() {
            settings.set(flag, self.read_flag(flag.storage_key())?.unwrap_or(false));
        }
        Ok(settings)
    }

    pub fn set_accessibility_flag(&self, flag: AccessibilityFlag, enabled: bool) -> Result<()> {
        self.write_flag(flag.storage_key(), enabled)
    }

    // ============================================================================
    // Privacy
    // ============================================================================

    pub fn export_user_data(&self) -> Result<StoredUserData> {
        Ok(StoredUserData {
            user: self.load_user()?,
            preferences: self.read_json(keys::USER_PREFERENCES)?,
            content: self.load_content()?,
        })
    }

    /// Removes the user, their preferences and generated content.
    ///
    /// Consent and accessibility flags are device settings and survive.
    pub fn delete_user_data(&self) -> Result<()> {
        for key in keys::USER_DATA {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::ThemeMode;
    use crate::storage::MemoryKeyValueStore;

    fn store() -> (Arc<MemoryKeyValueStore>, PreferenceStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        (kv.clone(), PreferenceStore::new(kv))
    }

    #[test]
    fn test_preferences_default_when_absent() {
        let (_, prefs) = store();
        assert_eq!(prefs.load_preferences().unwrap(), UserPreferences::default());
    }

    #[test]
    fn test_preferences_round_trip() {
        let (kv, prefs) = store();
        let saved = UserPreferences {
            color: "#ff0000".into(),
            values: "privacy".into(),
            goal: "learn".into(),
            theme: ThemeMode::Dark,
        };
        prefs.save_preferences(&saved).unwrap();
        assert_eq!(prefs.load_preferences().unwrap(), saved);

        let raw = kv.get(keys::USER_PREFERENCES).unwrap().unwrap();
        assert!(raw.contains("\"theme\":\"dark\""));
    }

    #[test]
    fn test_malformed_preferences_fall_back_to_defaults() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([(
            keys::USER_PREFERENCES,
            "{not json",
        )]));
        let prefs = PreferenceStore::new(kv);
        assert_eq!(prefs.load_preferences().unwrap(), UserPreferences::default());
    }

    #[test]
    fn test_consent_flags() {
        let (kv, prefs) = store();
        assert_eq!(prefs.consent().unwrap(), None);
        prefs.record_consent(false).unwrap();
        assert_eq!(prefs.consent().unwrap(), Some(false));
        prefs.record_consent(true).unwrap();
        assert_eq!(kv.get(keys::PRIVACY_CONSENT).unwrap().as_deref(), Some("true"));

        kv.set(keys::PRIVACY_CONSENT, "maybe").unwrap();
        assert_eq!(prefs.consent().unwrap(), None);
    }

    #[test]
    fn test_accessibility_flags() {
        let (_, prefs) = store();
        prefs
            .set_accessibility_flag(AccessibilityFlag::ReducedMotion, true)
            .unwrap();
        let settings = prefs.accessibility().unwrap();
        assert!(settings.reduced_motion);
        assert!(!settings.large_text);
    }

    #[test]
    fn test_delete_user_data_keeps_device_settings() {
        let (kv, prefs) = store();
        prefs.save_user(&AnonymousUser::with_id("u1")).unwrap();
        prefs.save_preferences(&UserPreferences::default()).unwrap();
        prefs.save_content(&PersonalizedContent::fallback(0)).unwrap();
        prefs.record_consent(true).unwrap();

        prefs.delete_user_data().unwrap();

        let exported = prefs.export_user_data().unwrap();
        assert!(exported.user.is_none());
        assert!(exported.preferences.is_none());
        assert!(exported.content.is_none());
        assert_eq!(kv.keys().unwrap(), vec![keys::PRIVACY_CONSENT.to_string()]);
    }
}
