//! Interactive onboarding session.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use naible_application::ChatAssistant;
use naible_core::conversation::{TOTAL_QUESTION_STEPS, question};
use naible_core::typewriter::{BASE_TYPING_SPEED_MS, strip_identifier, typing_speed};
use naible_core::{ConversationStep, StepResponse};
use naible_server::AppState;
use naible_server::bootstrap;
use rustyline::DefaultEditor;

use super::utils::{is_yes, read_line};

/// Only the consent answer itself is recorded after a decline.
const DECLINED_NOTICE: &str = "Understood. None of your answers will be stored.";

/// Prints `text` one character at a time, paced by its length.
async fn type_out(text: &str) -> Result<()> {
    let text = strip_identifier(text);
    let delay = Duration::from_secs_f64(typing_speed(text, BASE_TYPING_SPEED_MS) / 1000.0);
    let mut stdout = std::io::stdout();
    for ch in text.chars() {
        print!("{}", ch.to_string().bright_magenta());
        stdout.flush()?;
        tokio::time::sleep(delay).await;
    }
    println!();
    Ok(())
}

fn progress(step: ConversationStep) -> String {
    match step.question_index() {
        Some(index) => format!("[{index}/{TOTAL_QUESTION_STEPS}] "),
        None => String::new(),
    }
}

/// Asks for the response to `step`. `None` ends the session.
async fn ask(rl: &mut DefaultEditor, step: ConversationStep) -> Result<Option<StepResponse>> {
    let copy = question(step);
    if !copy.is_empty() {
        print!("{}", progress(step).bright_black());
        type_out(copy).await?;
    }

    let response = match step {
        ConversationStep::PrivacyConsent => {
            read_line(rl, "Accept? [y/N] ")?.map(|answer| StepResponse::Consent(is_yes(&answer)))
        }
        ConversationStep::Introduction => {
            read_line(rl, "Press Enter to begin ")?.map(|_| StepResponse::Start)
        }
        _ => read_line(rl, ">> ")?.map(StepResponse::Answer),
    };
    Ok(response)
}

pub async fn run() -> Result<()> {
    let (_, state) = bootstrap::bootstrap()?;
    let controller = &state.controller;
    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== Naible ===".bright_magenta().bold());
    println!("{}", "Press Ctrl-D at any time to leave.".bright_black());
    println!();

    loop {
        let step = controller.current_step().await;
        match step {
            ConversationStep::SiteAssembly => {
                println!("{}", "Assembling your personalized site...".bright_cyan());
                controller.wait_for_hero().await?;
                continue;
            }
            ConversationStep::PersonalizedHero => {
                show_hero(&state)?;
                return chat(&mut rl, &state).await;
            }
            _ => {}
        }

        let Some(response) = ask(&mut rl, step).await? else {
            return Ok(());
        };
        let declined = response == StepResponse::Consent(false);

        match controller.advance(step, response).await {
            Ok(_) if declined => {
                println!("{}", DECLINED_NOTICE.yellow());
                return Ok(());
            }
            Ok(_) => println!(),
            Err(e) if e.is_validation() => println!("{}", e.to_string().yellow()),
            Err(e) => return Err(e.into()),
        }
    }
}

fn show_hero(state: &AppState) -> Result<()> {
    let personalization = &state.personalization;
    let content = personalization.content()?.unwrap_or_default();
    let palette = personalization.theme()?.color_palette;

    println!();
    println!("{}", content.welcome_message.bright_black());
    println!("{}", content.headline.bold());
    println!("{}", content.subheading);
    println!("{}", format!("[ {} ]", content.cta_text).bright_green().bold());
    println!(
        "{}",
        format!(
            "primary {}  light {}  dark {}  accent {}",
            palette.primary, palette.light, palette.dark, palette.accent
        )
        .bright_black()
    );
    println!();

    println!("{}", "Suggested for you:".bright_magenta());
    let preferences = personalization.preferences()?;
    for suggestion in state.suggestions.suggest(&preferences) {
        println!("  {} {}", "•".bright_cyan(), suggestion.title);
    }
    println!();
    Ok(())
}

async fn chat(rl: &mut DefaultEditor, state: &Arc<AppState>) -> Result<()> {
    type_out(&ChatAssistant::greeting(None)).await?;

    while let Some(line) = read_line(rl, "you> ")? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "quit" || message == "exit" {
            println!("{}", "Goodbye!".bright_green());
            break;
        }
        let preferences = state.personalization.preferences()?;
        type_out(&state.assistant.reply(message, &preferences)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_marks_question_steps_only() {
        assert_eq!(progress(ConversationStep::Values), "[3/4] ");
        assert_eq!(progress(ConversationStep::PrivacyConsent), "");
    }
}
