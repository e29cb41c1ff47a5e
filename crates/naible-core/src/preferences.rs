//! UserPreferences domain model.
//!
//! The three answers collected by the onboarding conversation, plus the
//! light/dark preference. Stored as camelCase JSON so records written by
//! older clients keep loading.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default primary colour used until the user picks one.
pub const DEFAULT_PRIMARY_COLOR: &str = "#4F46E5";

/// Light/dark preference.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// User preference selections collected during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Primary colour as a hex string (`#RRGGBB`).
    pub color: String,
    /// Free-text, comma-separated values.
    pub values: String,
    /// Free-text goal.
    pub goal: String,
    pub theme: ThemeMode,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            color: DEFAULT_PRIMARY_COLOR.to_string(),
            values: String::new(),
            goal: String::new(),
            theme: ThemeMode::System,
        }
    }
}

impl UserPreferences {
    /// Colour to theme with; empty selections fall back to the default primary.
    pub fn effective_color(&self) -> &str {
        if self.color.trim().is_empty() {
            DEFAULT_PRIMARY_COLOR
        } else {
            self.color.trim()
        }
    }

    /// Splits `values` into lower-cased, trimmed, non-empty entries.
    pub fn value_list(&self) -> Vec<String> {
        split_values(&self.values)
    }
}

/// Lower-cases, comma-splits and trims a free-text values answer.
pub fn split_values(values: &str) -> Vec<String> {
    values
        .to_lowercase()
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.color, "#4F46E5");
        assert!(prefs.values.is_empty());
        assert!(prefs.goal.is_empty());
        assert_eq!(prefs.theme, ThemeMode::System);
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"values":"Privacy"}"#).unwrap();
        assert_eq!(prefs.color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(prefs.values, "Privacy");
        assert_eq!(prefs.theme, ThemeMode::System);
    }

    #[test]
    fn test_theme_mode_round_trips_lowercase() {
        let json = serde_json::to_string(&ThemeMode::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
    }

    #[test]
    fn test_value_list() {
        let prefs = UserPreferences {
            values: " Privacy, SECURITY ,, trust".to_string(),
            ..Default::default()
        };
        assert_eq!(prefs.value_list(), vec!["privacy", "security", "trust"]);
    }

    #[test]
    fn test_effective_color_defaults_when_blank() {
        let prefs = UserPreferences {
            color: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(prefs.effective_color(), DEFAULT_PRIMARY_COLOR);
    }
}
