use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use naible_application::ExportFormat;
use naible_core::accessibility::AccessibilityFlag;
use naible_infrastructure::NaiblePaths;
use naible_server::logging;

mod commands;

#[derive(Parser)]
#[command(name = "naible")]
#[command(about = "Naible - personalised onboarding, theme generation and hero rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through the onboarding conversation
    Onboard,
    /// Print the theme generated for a colour and values
    Theme {
        /// Primary colour as #RRGGBB
        #[arg(long)]
        color: String,
        /// Comma-separated values
        #[arg(long, default_value = "")]
        values: String,
        /// Print the theme as JSON instead of a stylesheet
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP server
    Serve {
        /// Address to listen on (defaults to the configured one)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Export or delete stored user data
    Data {
        #[command(subcommand)]
        action: DataAction,
    },
    /// Show accessibility flags, or toggle one
    A11y {
        /// high_contrast, large_text, reduced_motion or screen_reader
        flag: Option<AccessibilityFlag>,
    },
    /// Show or forget the anonymous user
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum DataAction {
    /// Export everything stored about the user
    Export {
        #[arg(long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete the user, preferences and generated content
    Delete {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Print the current anonymous user
    Show,
    /// Forget the current user, keeping preferences
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Only the server logs below warn to the terminal.
    let filter = if matches!(cli.command, Commands::Serve { .. }) {
        logging::DEFAULT_FILTER
    } else {
        "warn"
    };
    let _guard = logging::init(filter, NaiblePaths::logs_dir().ok().as_deref())?;

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Theme {
            color,
            values,
            json,
        } => commands::theme::run(&color, &values, json)?,
        Commands::Serve { bind } => commands::serve::run(bind).await?,
        Commands::Data { action } => match action {
            DataAction::Export { format, output } => {
                commands::data::export(format, output.as_deref())?
            }
            DataAction::Delete { yes } => commands::data::delete(yes).await?,
        },
        Commands::A11y { flag } => commands::a11y::run(flag)?,
        Commands::User { action } => match action {
            UserAction::Show => commands::user::show()?,
            UserAction::Logout => commands::user::logout()?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_flags_and_formats() {
        let cli = Cli::try_parse_from(["naible", "a11y", "large_text"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::A11y {
                flag: Some(AccessibilityFlag::LargeText)
            }
        ));

        let cli = Cli::try_parse_from(["naible", "data", "export", "--format", "csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Data {
                action: DataAction::Export {
                    format: ExportFormat::Csv,
                    output: None
                }
            }
        ));

        assert!(Cli::try_parse_from(["naible", "a11y", "blink"]).is_err());
    }
}
