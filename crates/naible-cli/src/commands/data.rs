use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use naible_application::ExportFormat;
use naible_server::bootstrap;
use rustyline::DefaultEditor;

use super::utils::confirm;

pub fn export(format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let (_, state) = bootstrap::bootstrap()?;
    let export = state.privacy.export(format)?;

    match output {
        Some(path) => {
            fs::write(path, &export.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {}",
                "Exported to".bright_green(),
                path.display().to_string().bold()
            );
        }
        None => print!("{}", export.body),
    }
    Ok(())
}

pub async fn delete(yes: bool) -> Result<()> {
    if !yes {
        let mut rl = DefaultEditor::new()?;
        if !confirm(&mut rl, "Delete your user, preferences and generated content?")? {
            println!("{}", "Nothing deleted.".bright_black());
            return Ok(());
        }
    }

    let (_, state) = bootstrap::bootstrap()?;
    state.controller.forget(&state.privacy).await?;
    println!("{}", "All user data deleted.".bright_green());
    Ok(())
}
