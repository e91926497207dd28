use anyhow::Result;
use colored::Colorize;

pub fn handle(url: &str, mime: Option<&str>) -> Result<()> {
    let classification = plainview::classify::classify(url, mime);

    let verdict = if classification.should_display {
        "display".bright_green()
    } else {
        "pass through".bright_yellow()
    };
    println!("{}: {}", url.bright_cyan(), verdict);
    println!("  {} mode: {}", "•".bright_cyan(), classification.editor_mode);
    if classification.use_cpp() {
        println!("  {} C/C++ flavour", "•".bright_cyan());
    }

    Ok(())
}
