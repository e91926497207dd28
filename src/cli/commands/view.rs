use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::{open_viewer, print_plan, read_document};

pub fn handle(data_dir: Option<&Path>, file: &Path, url: &str, mime: Option<&str>) -> Result<()> {
    let viewer = open_viewer(data_dir)?;
    let content = read_document(file)?;

    if !viewer.classify(url, mime).should_display {
        println!(
            "{} {} is not a recognised text document, showing it anyway",
            "⚠".bright_yellow(),
            url
        );
    }

    let session = viewer.open(url, mime, content);
    print_plan(&session.render());

    if viewer.should_prompt_rating() {
        println!();
        println!("{}", "Do you like plainview? Rate it with `plainview rating now`".bright_magenta());
        println!("  (or `plainview rating later` / `plainview rating never`)");
    }

    Ok(())
}
