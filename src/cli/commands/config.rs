use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::open_viewer;
use crate::cli::ConfigAction;

pub fn handle(data_dir: Option<&Path>, action: ConfigAction) -> Result<()> {
    let mut viewer = open_viewer(data_dir)?;

    match action {
        ConfigAction::Set { key, value } => {
            println!("{} Setting {} = {}",
                "→".bright_green(),
                key.bright_cyan(),
                value.bright_yellow());

            viewer.config_mut().set(&key, &value)?;
            println!("{} Configuration updated", "✓".bright_green());
        }

        ConfigAction::Get { key } => {
            let value = viewer.config().get(&key)?;
            println!("{} = {}", key.bright_cyan(), value);
        }

        ConfigAction::List => {
            println!("{}", "Current Configuration:".bright_blue().bold());
            println!("  {} {}", "ℹ".bright_blue(), viewer.config().path.display());
            for (key, value) in viewer.config().entries() {
                println!("  {} = {}", key.bright_cyan(), value.bright_yellow());
            }
        }
    }

    Ok(())
}
