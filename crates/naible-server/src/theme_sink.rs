//! Theme sink backing `/theme.css`.

use std::sync::RwLock;

use naible_core::theme::{ThemeSink, ThemeTokens};

/// Keeps the last published tokens as a `:root` stylesheet.
#[derive(Debug, Default)]
pub struct StylesheetSink {
    css: RwLock<String>,
}

impl StylesheetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last published stylesheet, empty before the first publish.
    pub fn css(&self) -> String {
        match self.css.read() {
            Ok(css) => css.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ThemeSink for StylesheetSink {
    fn publish(&self, tokens: &ThemeTokens) {
        let css = tokens.to_css();
        match self.css.write() {
            Ok(mut current) => *current = css,
            Err(poisoned) => *poisoned.into_inner() = css,
        }
    }
}
