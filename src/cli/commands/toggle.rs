use anyhow::Result;
use colored::Colorize;
use plainview::transform::display_delimiter;
use std::path::Path;

use super::{open_viewer, print_plan, read_document};
use crate::cli::ToggleKind;

pub fn handle(
    data_dir: Option<&Path>,
    url: &str,
    kind: ToggleKind,
    file: Option<&Path>,
    count: Option<&str>,
    delimiter: Option<&str>,
) -> Result<()> {
    let viewer = open_viewer(data_dir)?;
    let content = match file {
        Some(path) => read_document(path)?,
        None => String::new(),
    };

    let mut session = viewer.open(url, None, content);
    let saved = session.state().clone();

    let summary = match kind {
        ToggleKind::Wrap => format!("line wrapping {}", on_off(session.toggle_wrap()?)),
        ToggleKind::Center => format!("centered view {}", on_off(session.toggle_center()?)),
        ToggleKind::Chars => {
            let count = count.map(str::to_string).unwrap_or_else(|| saved.hide_chars.to_string());
            session.toggle_hide_chars(&count)?;
            format!("hide chars {}", on_off(session.chars_hidden()))
        }
        ToggleKind::Columns => {
            let count = count.map(str::to_string).unwrap_or_else(|| saved.hide_columns.to_string());
            let delimiter = delimiter
                .map(str::to_string)
                .unwrap_or_else(|| display_delimiter(&saved.delimiter));
            session.toggle_hide_columns(&count, &delimiter)?;
            format!("hide columns {}", on_off(session.columns_hidden()))
        }
    };

    println!("{} {} for {}", "✓".bright_green(), summary, url.bright_cyan());

    if file.is_some() {
        print_plan(&session.render());
    }

    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
