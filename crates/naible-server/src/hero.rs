//! Server-rendered personalised hero page.

use minijinja::Environment;
use naible_application::Suggestion;
use naible_core::accessibility::AccessibilitySettings;
use naible_core::brand;
use naible_core::{NaibleError, PersonalizedContent, Result};
use serde::Serialize;

const HERO_TEMPLATE: &str = include_str!("../templates/hero.html");

#[derive(Serialize)]
struct BrandColors {
    green: &'static str,
    dark_green: &'static str,
    light_green: &'static str,
    accent_blue: &'static str,
    dark: &'static str,
}

const BRAND: BrandColors = BrandColors {
    green: brand::NAIBLE_GREEN,
    dark_green: brand::NAIBLE_DARK_GREEN,
    light_green: brand::NAIBLE_LIGHT_GREEN,
    accent_blue: brand::NAIBLE_ACCENT_BLUE,
    dark: brand::NAIBLE_DARK,
};

#[derive(Serialize)]
struct HeroPage<'a> {
    content: &'a PersonalizedContent,
    stylesheet: &'a str,
    suggestions: &'a [Suggestion],
    brand: &'a BrandColors,
    reduced_motion: bool,
    screen_reader: bool,
}

/// Renders the hero page. Content is HTML-escaped; the stylesheet is
/// generated by the theme and inserted as is.
pub struct HeroRenderer {
    env: Environment<'static>,
}

impl HeroRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("hero.html", HERO_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        content: &PersonalizedContent,
        stylesheet: &str,
        suggestions: &[Suggestion],
        accessibility: &AccessibilitySettings,
    ) -> Result<String> {
        let page = HeroPage {
            content,
            stylesheet,
            suggestions,
            brand: &BRAND,
            reduced_motion: accessibility.reduced_motion,
            screen_reader: accessibility.screen_reader,
        };
        self.env
            .get_template("hero.html")
            .and_then(|template| template.render(&page))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> NaibleError {
    NaibleError::internal(format!("hero template: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use naible_core::generate_theme;

    #[test]
    fn test_renders_content_and_theme() {
        let renderer = HeroRenderer::new().unwrap();
        let css = generate_theme("#ff0000", "").tokens().to_css();
        let html = renderer
            .render(
                &PersonalizedContent::fallback(0),
                &css,
                &[],
                &AccessibilitySettings::default(),
            )
            .unwrap();

        assert!(html.contains("--color-primary: #ff0000;"));
        assert!(html.contains("Get Early Access"));
        assert!(html.contains(brand::NAIBLE_GREEN));
        assert!(!html.contains("animation: none"));
    }

    #[test]
    fn test_generated_copy_is_escaped() {
        let renderer = HeroRenderer::new().unwrap();
        let content = PersonalizedContent {
            headline: "<script>alert(1)</script>".into(),
            ..PersonalizedContent::fallback(1)
        };
        let accessibility = AccessibilitySettings {
            reduced_motion: true,
            ..Default::default()
        };
        let html = renderer.render(&content, "", &[], &accessibility).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("animation: none"));
    }
}
