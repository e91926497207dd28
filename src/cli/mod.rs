pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plainview")]
#[command(about = "Read-only plain-text viewer with remembered per-document toggles", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "PLAINVIEW_HOME", help = "Profile directory for settings and view state")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Render a file the way the viewer would show it")]
    View {
        #[arg(help = "File holding the raw document text")]
        file: PathBuf,
        #[arg(short, long, help = "URL the document was loaded from")]
        url: String,
        #[arg(short, long, help = "MIME type from the Content-Type header")]
        mime: Option<String>,
    },

    #[command(about = "Flip one view toggle for a URL")]
    Toggle {
        #[arg(help = "Document URL")]
        url: String,
        #[arg(value_enum, help = "Toggle to flip")]
        kind: ToggleKind,
        #[arg(short, long, help = "Print the document afterwards")]
        file: Option<PathBuf>,
        #[arg(short, long, help = "Characters or columns to hide (defaults to the saved count)")]
        count: Option<String>,
        #[arg(short, long, help = "Column delimiter, \\t for tab (defaults to the saved one)")]
        delimiter: Option<String>,
    },

    #[command(about = "Show whether a URL is displayed and with which syntax mode")]
    Classify {
        url: String,
        #[arg(short, long)]
        mime: Option<String>,
    },

    #[command(about = "Inspect or clean up remembered view state")]
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    #[command(about = "Configure global viewer settings")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(about = "Answer or inspect the rating prompt")]
    Rating {
        #[command(subcommand)]
        action: RatingAction,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ToggleKind {
    Wrap,
    Center,
    Chars,
    Columns,
}

#[derive(Subcommand)]
pub enum StateAction {
    #[command(about = "Show the saved state for a URL")]
    Show { url: String },
    #[command(about = "List every remembered URL")]
    List,
    #[command(about = "Forget the saved state for a URL")]
    Forget { url: String },
    #[command(about = "Keep only the most recently used records")]
    Prune {
        #[arg(short, long, default_value_t = 1000)]
        keep: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        key: String,
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

#[derive(Subcommand)]
pub enum RatingAction {
    #[command(about = "Ask again in a week")]
    Later,
    #[command(about = "Never ask again")]
    Never,
    #[command(about = "Open the review page and stop asking")]
    Now,
    #[command(about = "Show when the prompt appears next")]
    Status,
}
