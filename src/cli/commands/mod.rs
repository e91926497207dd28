pub mod classify;
pub mod config;
pub mod rating;
pub mod state;
pub mod toggle;
pub mod view;

use anyhow::{Context, Result};
use colored::Colorize;
use plainview::{RenderPlan, Viewer};
use std::path::Path;

pub fn open_viewer(data_dir: Option<&Path>) -> Result<Viewer> {
    match data_dir {
        Some(dir) => Viewer::new(dir)
            .with_context(|| format!("Failed to open profile at {}", dir.display())),
        None => Viewer::open_default().context("Failed to open the default profile"),
    }
}

/// Bytes that are not UTF-8 show as U+FFFD instead of failing the view.
pub fn read_document(file: &Path) -> Result<String> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn print_plan(plan: &RenderPlan) {
    println!(
        "{} mode={} wrap={} layout={:?} ({} / margin {})",
        "▸".bright_blue(),
        plan.editor_mode.bright_cyan(),
        plan.line_wrapping,
        plan.layout,
        plan.layout.width(),
        plan.layout.margin()
    );
    if let Some(family) = &plan.font.font_family {
        println!("  {} font-family: {}", "•".bright_cyan(), family);
    }
    if let Some(size) = &plan.font.font_size {
        println!("  {} font-size: {}", "•".bright_cyan(), size);
    }
    println!(
        "  {} [{}] chars: {}   [{}] cols: {} delim: {}",
        "•".bright_cyan(),
        plan.hide_chars_label.bright_yellow(),
        plan.hide_chars_input,
        plan.hide_columns_label.bright_yellow(),
        plan.hide_columns_input,
        plan.delimiter_input
    );
    println!("{}", "-".repeat(40).bright_black());
    println!("{}", plan.text);
}
