use anyhow::Result;
use colored::Colorize;
use naible_server::bootstrap;

pub fn show() -> Result<()> {
    let (_, state) = bootstrap::bootstrap()?;
    match state.users.current_user()? {
        Some(user) => {
            println!("{} {}", "id:".bright_black(), user.id);
            println!("{} {}", "anonymous:".bright_black(), user.is_anonymous);
            println!("{} {}", "created:".bright_black(), user.created_at.to_rfc3339());
        }
        None => println!("{}", "No user stored.".yellow()),
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let (_, state) = bootstrap::bootstrap()?;
    state.users.logout()?;
    println!("{}", "Logged out. Preferences were kept.".bright_green());
    Ok(())
}
