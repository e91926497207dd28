use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::SettingsData;
use crate::error::{ConfigError, ViewerError};

pub const SETTINGS_FILE: &str = "settings.toml";

/// Days until the rating prompt first shows up on a new profile.
pub const FIRST_RATING_PROMPT_DAYS: i64 = 7;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &["do_line_wrap", "font_family", "font_size", "max_state_entries"];

/// Platform data directory for the default profile.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "plainview", "plainview")
        .ok_or_else(|| anyhow::anyhow!("Could not determine a home directory for plainview data"))?;
    Ok(dirs.data_dir().to_path_buf())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data: SettingsData,
    pub path: PathBuf,
}

impl Config {
    /// Loads settings from `data_dir`, creating them on first use.
    pub fn load_or_create(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_or_create_at(data_dir, Utc::now())
    }

    pub(crate) fn load_or_create_at(data_dir: impl AsRef<Path>, now: DateTime<Utc>) -> Result<Self> {
        let path = data_dir.as_ref().join(SETTINGS_FILE);

        if path.exists() {
            let data = match read_settings(&path) {
                Ok(data) => data,
                Err(e) => {
                    warn!("Using default settings, {} is unusable: {:#}", path.display(), e);
                    SettingsData::default()
                }
            };
            return Ok(Self { data, path });
        }

        let config = Self {
            data: SettingsData {
                next_rating_prompt: Some(now + Duration::days(FIRST_RATING_PROMPT_DAYS)),
                ..SettingsData::default()
            },
            path,
        };
        config.save()?;
        debug!("Created settings at {}", config.path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.write(&self.data)
    }

    fn write(&self, data: &SettingsData) -> Result<()> {
        let content = toml::to_string_pretty(data)
            .context("Failed to serialize settings")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        fs::write(&self.path, content)
            .context("Failed to write settings file")?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        };

        let mut data = self.data.clone();
        match key {
            "do_line_wrap" => {
                data.do_line_wrap = value.parse().map_err(|_| invalid())?;
            }
            "font_family" => {
                if value.trim().is_empty() {
                    return Err(invalid().into());
                }
                data.font_family = value.trim().to_string();
            }
            "font_size" => {
                data.font_size = value.parse().map_err(|_| invalid())?;
            }
            "max_state_entries" => {
                data.max_state_entries = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(unknown_key(key).into()),
        }

        // Only take the new value once it is on disk
        self.write(&data)?;
        self.data = data;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "do_line_wrap" => self.data.do_line_wrap.to_string(),
            "font_family" => self.data.font_family.clone(),
            "font_size" => self.data.font_size.to_string(),
            "max_state_entries" => self.data.max_state_entries.to_string(),
            _ => return Err(unknown_key(key).into()),
        };

        Ok(value)
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

fn read_settings(path: &Path) -> Result<SettingsData> {
    let content = fs::read_to_string(path)
        .context("Failed to read settings file")?;
    toml::from_str(&content).context("Failed to parse settings file")
}

fn unknown_key(key: &str) -> ViewerError {
    ViewerError::Config(ConfigError::UnknownKey { key: key.to_string() })
}
