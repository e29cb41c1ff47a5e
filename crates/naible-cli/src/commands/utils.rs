use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Reads one line. `None` means the user pressed Ctrl-C or Ctrl-D.
pub fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = rl.add_history_entry(line.as_str());
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("{}", "Goodbye!".bright_green());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Asks a yes/no question; anything but y/yes is a no.
pub fn confirm(rl: &mut DefaultEditor, question: &str) -> Result<bool> {
    let answer = read_line(rl, &format!("{question} [y/N] "))?;
    Ok(answer.is_some_and(|a| is_yes(&a)))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
