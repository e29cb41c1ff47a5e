use anyhow::Result;
use colored::Colorize;
use naible_core::accessibility::AccessibilityFlag;
use naible_server::bootstrap;
use strum::IntoEnumIterator;

pub fn run(flag: Option<AccessibilityFlag>) -> Result<()> {
    let (_, state) = bootstrap::bootstrap()?;
    let personalization = &state.personalization;

    let settings = match flag {
        Some(flag) => personalization.toggle_accessibility(flag)?,
        None => personalization.accessibility()?,
    };

    for flag in AccessibilityFlag::iter() {
        let status = if settings.get(flag) {
            "on".bright_green()
        } else {
            "off".bright_black()
        };
        println!("{:<15} {status}", flag.to_string());
    }
    Ok(())
}
