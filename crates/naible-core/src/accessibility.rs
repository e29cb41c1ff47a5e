//! Accessibility toggles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::storage::keys;

/// One of the four independently toggled accessibility flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessibilityFlag {
    HighContrast,
    LargeText,
    ReducedMotion,
    ScreenReader,
}

impl AccessibilityFlag {
    /// Storage key the flag is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::HighContrast => keys::A11Y_HIGH_CONTRAST,
            Self::LargeText => keys::A11Y_LARGE_TEXT,
            Self::ReducedMotion => keys::A11Y_REDUCED_MOTION,
            Self::ScreenReader => keys::A11Y_SCREEN_READER,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
    pub screen_reader: bool,
}

impl AccessibilitySettings {
    pub fn get(&self, flag: AccessibilityFlag) -> bool {
        match flag {
            AccessibilityFlag::HighContrast => self.high_contrast,
            AccessibilityFlag::LargeText => self.large_text,
            AccessibilityFlag::ReducedMotion => self.reduced_motion,
            AccessibilityFlag::ScreenReader => self.screen_reader,
        }
    }

    pub fn set(&mut self, flag: AccessibilityFlag, enabled: bool) {
        match flag {
            AccessibilityFlag::HighContrast => self.high_contrast = enabled,
            AccessibilityFlag::LargeText => self.large_text = enabled,
            AccessibilityFlag::ReducedMotion => self.reduced_motion = enabled,
            AccessibilityFlag::ScreenReader => self.screen_reader = enabled,
        }
    }

    /// Flips `flag` and returns its new value.
    pub fn toggle(&mut self, flag: AccessibilityFlag) -> bool {
        let next = !self.get(flag);
        self.set(flag, next);
        next
    }
}
