//! Typography presets keyed off the user's stated values.

use serde::{Deserialize, Serialize};

use crate::preferences::split_values;

pub const BASE_SIZE: &str = "1rem";
const SYSTEM_STACK: &str = "system-ui, sans-serif";

/// Font choices derived from the values answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub heading_font: String,
    pub base_size: String,
    pub scale: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self::preset(SYSTEM_STACK, SYSTEM_STACK, 1.2)
    }
}

impl Typography {
    fn preset(font_family: &str, heading_font: &str, scale: f64) -> Self {
        Self {
            font_family: font_family.to_string(),
            heading_font: heading_font.to_string(),
            base_size: BASE_SIZE.to_string(),
            scale,
        }
    }
}

/// (keywords, body font, heading font, scale), checked in order.
const PRESETS: [(&[&str], &str, &str, f64); 4] = [
    (
        &["minimal", "clean"],
        "system-ui, -apple-system, sans-serif",
        "system-ui, -apple-system, sans-serif",
        1.1,
    ),
    (
        &["elegant", "sophisticated"],
        "Georgia, serif",
        "Georgia, serif",
        1.25,
    ),
    (
        &["modern", "tech"],
        "Inter, system-ui, sans-serif",
        "Inter, system-ui, sans-serif",
        1.2,
    ),
    (
        &["creative", "artistic"],
        SYSTEM_STACK,
        "Playfair Display, Georgia, serif",
        1.3,
    ),
];

/// Picks the first preset whose keyword appears inside any value entry.
pub fn generate_typography(values: &str) -> Typography {
    let entries = split_values(values);

    PRESETS
        .iter()
        .find(|(keywords, ..)| {
            entries
                .iter()
                .any(|entry| keywords.iter().any(|keyword| entry.contains(keyword)))
        })
        .map(|(_, body, heading, scale)| Typography::preset(body, heading, *scale))
        .unwrap_or_default()
}
