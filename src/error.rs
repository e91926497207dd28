use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plainview operations
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Problems with persisted view state.
///
/// These never reach the renderer: the store logs them and falls back to
/// the default record.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to access state store at {path:?}: {message}")]
    AccessError { path: PathBuf, message: String },

    #[error("State store corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    #[error("Malformed entry for {key}: {message}")]
    MalformedEntry { key: String, message: String },

    #[error("State store locked by another process")]
    Locked,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown config key: {key}")]
    UnknownKey { key: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Error display helper for CLI
pub fn display_error(error: &anyhow::Error) {
    use colored::Colorize;

    eprintln!("\n{} {}", "✗".bright_red().bold(), "Operation failed".bright_red().bold());
    eprintln!("  {} {}", "├".bright_black(), error);

    for cause in error.chain().skip(1) {
        eprintln!("  {} Caused by: {}", "├".bright_black(), cause);
    }

    match error.downcast_ref::<ViewerError>() {
        Some(ViewerError::Config(ConfigError::UnknownKey { .. })) => {
            eprintln!("  {} Run {} to see the known keys", "└".bright_cyan(), "plainview config list".bright_cyan());
        }
        Some(ViewerError::State(StateError::Locked)) => {
            eprintln!("  {} Another process may be accessing the state store", "└".bright_cyan());
            eprintln!("    Wait a moment and try again");
        }
        _ => {
            let error_str = error.to_string();
            if error_str.contains("No such file") {
                eprintln!("  {} Check that the file path is correct", "└".bright_cyan());
            } else {
                eprintln!("  {} Set {} for more details", "└".bright_black(), "RUST_LOG=debug".bright_cyan());
            }
        }
    }
}
