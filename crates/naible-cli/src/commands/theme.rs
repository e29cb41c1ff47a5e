use anyhow::Result;
use naible_core::generate_theme;

pub fn run(color: &str, values: &str, json: bool) -> Result<()> {
    let theme = generate_theme(color, values);
    if json {
        println!("{}", serde_json::to_string_pretty(&theme)?);
    } else {
        print!("{}", theme.tokens().to_css());
    }
    Ok(())
}
