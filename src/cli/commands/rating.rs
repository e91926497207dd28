use anyhow::Result;
use colored::Colorize;
use plainview::rating::RatingAnswer;
use std::path::Path;

use super::open_viewer;
use crate::cli::RatingAction;

pub fn handle(data_dir: Option<&Path>, action: RatingAction) -> Result<()> {
    let mut viewer = open_viewer(data_dir)?;

    let answer = match action {
        RatingAction::Later => RatingAnswer::Later,
        RatingAction::Never => RatingAnswer::Never,
        RatingAction::Now => RatingAnswer::RateNow,
        RatingAction::Status => {
            match viewer.config().data.next_rating_prompt {
                Some(at) => println!("Next prompt after {}", at.format("%Y-%m-%d %H:%M UTC").to_string().bright_cyan()),
                None => println!("{} The rating prompt is off", "ℹ".bright_blue()),
            }
            return Ok(());
        }
    };

    viewer.answer_rating(answer)?;

    match answer {
        RatingAnswer::Never => println!("Aw, you cut me to the quick!"),
        RatingAnswer::Later => println!("{} Will ask again in a week", "✓".bright_green()),
        RatingAnswer::RateNow => println!("{} Thanks!", "♥".bright_red()),
    }
    if let Some(url) = answer.follow_up_url() {
        println!("  {}", url.bright_cyan());
    }

    Ok(())
}
