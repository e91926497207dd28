use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::open_viewer;
use crate::cli::StateAction;

pub fn handle(data_dir: Option<&Path>, action: StateAction) -> Result<()> {
    let viewer = open_viewer(data_dir)?;
    let store = viewer.store();

    match action {
        StateAction::Show { url } => {
            let state = store.load(&url);
            println!("{}", url.bright_cyan());
            println!("{}", serde_json::to_string_pretty(&state)?);
        }

        StateAction::List => {
            let entries = store.list()?;
            if entries.is_empty() {
                println!("  {} No remembered documents", "ℹ".bright_blue());
            } else {
                println!("{}", format!("{} remembered documents:", entries.len()).bright_blue().bold());
                for entry in entries {
                    println!(
                        "  {} {} {}",
                        "•".bright_cyan(),
                        entry.updated_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                        entry.url
                    );
                }
            }
        }

        StateAction::Forget { url } => {
            if store.remove(&url)? {
                println!("{} Forgot {}", "✓".bright_green(), url);
            } else {
                println!("{} Nothing saved for {}", "⚠".bright_yellow(), url);
            }
        }

        StateAction::Prune { keep } => {
            let removed = store.prune(keep)?;
            println!("{} Removed {} records, kept at most {}", "✓".bright_green(), removed, keep);
        }
    }

    Ok(())
}
