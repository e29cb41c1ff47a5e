//! Theme tokens: the CSS custom properties a generated theme publishes.

use serde::{Deserialize, Serialize};

use super::GeneratedTheme;
use crate::accessibility::AccessibilitySettings;

pub const LARGE_TEXT_BASE_SIZE: &str = "1.25rem";
pub const HIGH_CONTRAST_TEXT: &str = "#ffffff";

/// Ordered `--name: value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTokens {
    entries: Vec<(String, String)>,
}

impl ThemeTokens {
    /// Builds the token set for `theme`.
    pub fn from_theme(theme: &GeneratedTheme) -> Self {
        let palette = &theme.color_palette;
        let typography = &theme.typography;

        let mut tokens = Self::default();
        tokens.insert("--color-primary", &palette.primary);
        tokens.insert("--color-light", &palette.light);
        tokens.insert("--color-dark", &palette.dark);
        tokens.insert("--color-accent", &palette.accent);
        tokens.insert("--color-glass", &palette.glass);
        tokens.insert("--color-primary-rgb", &theme.primary_rgb.to_triple());
        tokens.insert("--font-family", &typography.font_family);
        tokens.insert("--heading-font", &typography.heading_font);
        tokens.insert("--base-size", &typography.base_size);
        tokens.insert("--scale", &typography.scale.to_string());
        tokens
    }

    /// Applies the accessibility overlay on top of the generated tokens.
    pub fn with_accessibility(mut self, settings: &AccessibilitySettings) -> Self {
        if settings.large_text {
            self.insert("--base-size", LARGE_TEXT_BASE_SIZE);
        }
        if settings.high_contrast {
            self.insert("--color-text", HIGH_CONTRAST_TEXT);
        }
        if settings.reduced_motion {
            self.insert("--motion-scale", "0");
        }
        self
    }

    /// Sets a token, replacing an existing value in place.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders a `:root { ... }` stylesheet.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.iter() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// Receives theme tokens whenever preferences change.
pub trait ThemeSink: Send + Sync {
    fn publish(&self, tokens: &ThemeTokens);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeSink;

impl ThemeSink for NoopThemeSink {
    fn publish(&self, _tokens: &ThemeTokens) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::generate_theme;

    #[test]
    fn test_tokens_cover_every_property() {
        let tokens = ThemeTokens::from_theme(&generate_theme("#4F46E5", ""));
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens.get("--color-primary"), Some("#4F46E5"));
        assert_eq!(tokens.get("--color-primary-rgb"), Some("79, 70, 229"));
        assert_eq!(tokens.get("--color-glass"), Some("rgba(79, 70, 229, 0.2)"));
        assert_eq!(tokens.get("--scale"), Some("1.2"));
    }

    #[test]
    fn test_accessibility_overlay() {
        let settings = AccessibilitySettings {
            large_text: true,
            high_contrast: true,
            ..Default::default()
        };
        let tokens = ThemeTokens::from_theme(&generate_theme("#4F46E5", ""))
            .with_accessibility(&settings);
        assert_eq!(tokens.get("--base-size"), Some("1.25rem"));
        assert_eq!(tokens.get("--color-text"), Some("#ffffff"));
        assert_eq!(tokens.get("--motion-scale"), None);
        assert_eq!(tokens.len(), 11);
    }

    #[test]
    fn test_css_rendering() {
        let mut tokens = ThemeTokens::default();
        tokens.insert("--color-primary", "#000000");
        tokens.insert("--scale", "1.1");
        assert_eq!(
            tokens.to_css(),
            ":root {\n  --color-primary: #000000;\n  --scale: 1.1;\n}\n"
        );
    }
}
