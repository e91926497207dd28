pub mod atomic;
pub mod local;

pub use local::ViewStateStore;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::ViewState;

pub const STORE_VERSION: &str = "0.1.0";

/// Namespace prepended to every URL to form its storage key.
pub const STATE_KEY_PREFIX: &str = "btv_state_";

pub fn state_key(url: &str) -> String {
    format!("{}{}", STATE_KEY_PREFIX, url)
}

/// One persisted record, wrapped with what retention needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredState {
    pub url: String,
    pub state: ViewState,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// On-disk envelope.
///
/// Entries stay as raw JSON until read so that one bad record does not
/// poison the rest of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateData {
    pub version: String,
    #[serde(default)]
    pub entries: HashMap<String, serde_json::Value>,
}

impl Default for StateData {
    fn default() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            entries: HashMap::new(),
        }
    }
}
