//! Theme generation.
//!
//! `generate_theme` is a pure function of the primary colour and the values
//! answer. It derives a five-colour palette and a typography preset; the
//! result is published as CSS custom properties through [`ThemeTokens`].
//!
//! # Module Structure
//!
//! - `color`: hex / RGB / HSL conversions
//! - `typography`: value-keyed font presets
//! - `tokens`: CSS custom properties and the `ThemeSink` publication seam

mod color;
mod tokens;
mod typography;

pub use color::{Hsl, Rgb};
pub use tokens::{HIGH_CONTRAST_TEXT, LARGE_TEXT_BASE_SIZE, NoopThemeSink, ThemeSink, ThemeTokens};
pub use typography::{Typography, generate_typography};

use serde::{Deserialize, Serialize};

use crate::preferences::DEFAULT_PRIMARY_COLOR;

/// Lightness bounds every derived colour is held to.
pub const MIN_LIGHTNESS: u8 = 5;
pub const MAX_LIGHTNESS: u8 = 95;

const GLASS_ALPHA: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// The primary colour as supplied (or the default when unparseable).
    pub primary: String,
    pub light: String,
    pub dark: String,
    /// Complementary hue.
    pub accent: String,
    /// `rgba(...)` of the primary at 20% opacity.
    pub glass: String,
}

/// Derived theme. Never stored; recomputed whenever preferences change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTheme {
    pub color_palette: ColorPalette,
    pub typography: Typography,
    #[serde(skip)]
    pub(crate) primary_rgb: Rgb,
}

impl GeneratedTheme {
    pub fn tokens(&self) -> ThemeTokens {
        ThemeTokens::from_theme(self)
    }

    pub fn primary_rgb(&self) -> Rgb {
        self.primary_rgb
    }
}

impl Default for GeneratedTheme {
    fn default() -> Self {
        generate_theme(DEFAULT_PRIMARY_COLOR, "")
    }
}

fn clamp_lightness(l: i16) -> u8 {
    l.clamp(i16::from(MIN_LIGHTNESS), i16::from(MAX_LIGHTNESS)) as u8
}

/// Derives the palette for a primary colour.
///
/// Unparseable input falls back to the default primary and logs a warning.
pub fn generate_palette(color: &str) -> (ColorPalette, Rgb) {
    let (primary, rgb) = match Rgb::from_hex(color) {
        Some(rgb) => (color.trim().to_string(), rgb),
        None => {
            tracing::warn!(
                color = %color,
                "[Theme] Unparseable primary colour, using default {}",
                DEFAULT_PRIMARY_COLOR
            );
            let rgb = Rgb::from_hex(DEFAULT_PRIMARY_COLOR).unwrap_or(Rgb::new(79, 70, 229));
            (DEFAULT_PRIMARY_COLOR.to_string(), rgb)
        }
    };

    let Hsl { h, s, l } = rgb.to_hsl();
    let (s, l) = (i16::from(s), i16::from(l));

    let light = Hsl::new(h, (s - 10).max(0) as u8, clamp_lightness(l + 25)).to_rgb();
    let dark = Hsl::new(h, (s + 10).min(100) as u8, clamp_lightness(l - 20)).to_rgb();
    let accent = Hsl::new((h + 180) % 360, s as u8, clamp_lightness(l)).to_rgb();

    let palette = ColorPalette {
        primary,
        light: light.to_hex(),
        dark: dark.to_hex(),
        accent: accent.to_hex(),
        glass: rgb.to_rgba(GLASS_ALPHA),
    };
    (palette, rgb)
}

/// Generates the full theme for a primary colour and a values answer.
///
/// # Arguments
///
/// * `color` - Hex colour (`#RRGGBB`, `RRGGBB` or `#RGB`)
/// * `values` - Free-text, comma separated values
///
/// # Returns
///
/// The palette and typography. Identical inputs always produce identical output.
pub fn generate_theme(color: &str, values: &str) -> GeneratedTheme {
    let (color_palette, primary_rgb) = generate_palette(color);
    GeneratedTheme {
        color_palette,
        typography: generate_typography(values),
        primary_rgb,
    }
}
