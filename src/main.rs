mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    if let Err(err) = run_command(cli) {
        plainview::error::display_error(&err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise INFO.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn run_command(cli: cli::Cli) -> Result<()> {
    use cli::Commands;

    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::View { file, url, mime } => commands::view::handle(data_dir, &file, &url, mime.as_deref()),
        Commands::Toggle { url, kind, file, count, delimiter } => commands::toggle::handle(
            data_dir,
            &url,
            kind,
            file.as_deref(),
            count.as_deref(),
            delimiter.as_deref(),
        ),
        Commands::Classify { url, mime } => commands::classify::handle(&url, mime.as_deref()),
        Commands::State { action } => commands::state::handle(data_dir, action),
        Commands::Config { action } => commands::config::handle(data_dir, action),
        Commands::Rating { action } => commands::rating::handle(data_dir, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_requested_level() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter("plainview=trace").max_level_hint(), Some(LevelFilter::TRACE));
    }
}
