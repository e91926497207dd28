//! Decides whether a response is viewable text and which syntax mode it gets.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TEXT_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(txt|log|toml|ini|yaml|yml|json|xml|html|css|js|md|py|go|rs|java|c|cpp|h|sh)(\?.*)?$")
        .expect("Failed to compile text file pattern")
});

static JSON_MIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i).+/json").expect("Failed to compile JSON mime pattern"));

static XML_MIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i).+/xml").expect("Failed to compile XML mime pattern"));

pub const PLAIN_TEXT_MODE: &str = "plain-text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub should_display: bool,
    pub editor_mode: String,
}

impl Classification {
    /// C-like modes highlight with the C/C++ flavour.
    pub fn use_cpp(&self) -> bool {
        self.editor_mode == "clike"
    }
}

pub fn classify(url: &str, mime_type: Option<&str>) -> Classification {
    let should_display = TEXT_FILE_PATTERN.is_match(url) || mime_type.map_or(false, is_structured_mime);

    let extension = extension_from_url(url).map(|ext| match mime_type {
        Some(mime) if JSON_MIME_PATTERN.is_match(mime) => "json".to_string(),
        Some(mime) if XML_MIME_PATTERN.is_match(mime) => "xml".to_string(),
        _ => ext,
    });

    Classification {
        should_display,
        editor_mode: mode_for_extension(extension.as_deref()).to_string(),
    }
}

fn is_structured_mime(mime_type: &str) -> bool {
    JSON_MIME_PATTERN.is_match(mime_type) || XML_MIME_PATTERN.is_match(mime_type)
}

/// Text after the last dot of the last path segment, ignoring query and fragment.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = url.split('?').next()?;
    let last_segment = path.rsplit('/').next()?;
    let file_name = last_segment.split('#').next()?;

    file_name
        .rfind('.')
        .map(|idx| file_name[idx + 1..].to_string())
}

pub fn mode_for_extension(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return PLAIN_TEXT_MODE;
    };

    match ext.trim().to_lowercase().as_str() {
        "xml" | "csproj" => "xml",
        "html" => "html",
        "cshtml" | "aspx" => "htmlmixed",
        "cs" | "java" | "c" | "cpp" | "h" => "clike",
        "sql" => "sql",
        "js" | "json" | "txt" | "log" | "toml" | "ini" | "yaml" | "yml" => "javascript",
        "css" => "css",
        "md" => "markdown",
        "py" => "python",
        "go" => "go",
        "rs" => "rust",
        "sh" => "shell",
        _ => PLAIN_TEXT_MODE,
    }
}
