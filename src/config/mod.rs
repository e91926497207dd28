pub mod settings;

pub use settings::Config;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::local::DEFAULT_MAX_ENTRIES;

/// Font family that means "leave the viewer's own font alone".
pub const DEFAULT_FONT_FAMILY: &str = "monospace";

/// Global viewer settings, consulted when a document has no saved override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub do_line_wrap: bool,
    pub font_family: String,
    /// Pixels; 0 keeps the default size.
    pub font_size: u32,
    /// When the rating prompt may next appear. Absent means never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_rating_prompt: Option<DateTime<Utc>>,
    /// Bound on remembered documents; 0 disables it.
    pub max_state_entries: usize,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            do_line_wrap: false,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 0,
            next_rating_prompt: None,
            max_state_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Style properties to apply on top of the viewer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontOverrides {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
}

impl SettingsData {
    pub fn font_overrides(&self) -> FontOverrides {
        FontOverrides {
            font_family: (self.font_family != DEFAULT_FONT_FAMILY).then(|| self.font_family.clone()),
            font_size: (self.font_size > 0).then(|| format!("{}px", self.font_size)),
        }
    }
}
