use serde::{Deserialize, Deserializer, Serialize};

use crate::transform::{parse_count, DEFAULT_DELIMITER};

pub const DEFAULT_HIDE_CHARS: usize = 50;
pub const DEFAULT_HIDE_COLUMNS: usize = 3;

/// Per-document view toggles, one record per URL.
///
/// Serialized with camelCase keys. Any field missing from a stored record
/// takes its default, so older or partial records still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    /// Overrides the global wrap setting when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_wrapping: Option<bool>,
    #[serde(deserialize_with = "center_view_or_default")]
    pub center_view: bool,
    #[serde(deserialize_with = "flag_or_default")]
    pub chars_hidden: bool,
    #[serde(deserialize_with = "hide_chars_or_default")]
    pub hide_chars: usize,
    #[serde(deserialize_with = "flag_or_default")]
    pub columns_hidden: bool,
    #[serde(deserialize_with = "hide_columns_or_default")]
    pub hide_columns: usize,
    #[serde(deserialize_with = "delimiter_or_default")]
    pub delimiter: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            line_wrapping: None,
            center_view: true,
            chars_hidden: false,
            hide_chars: DEFAULT_HIDE_CHARS,
            columns_hidden: false,
            hide_columns: DEFAULT_HIDE_COLUMNS,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl ViewState {
    pub fn effective_line_wrapping(&self, global_default: bool) -> bool {
        self.line_wrapping.unwrap_or(global_default)
    }
}

// A stored `null` means "never set" and takes the field default.

fn center_view_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn flag_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn delimiter_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()))
}

fn hide_chars_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count(deserializer, DEFAULT_HIDE_CHARS)
}

fn hide_columns_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count(deserializer, DEFAULT_HIDE_COLUMNS)
}

// Counts typed by hand may have been saved as negative numbers or strings.
fn lenient_count<'de, D>(deserializer: D, default: usize) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match value {
        serde_json::Value::Null => default,
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(u) => usize::try_from(u).unwrap_or(usize::MAX),
            None => n.as_f64().filter(|f| *f > 0.0).map(|f| f as usize).unwrap_or(0),
        },
        serde_json::Value::String(s) => parse_count(&s),
        _ => 0,
    };
    Ok(count)
}
