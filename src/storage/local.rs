use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::atomic::{lock::FileLock, open_lock_file, AtomicFile};
use super::{state_key, StateData, StoredState};
use crate::error::StateError;
use crate::state::ViewState;

pub const STATE_FILE: &str = "state.json";
const LOCK_FILE: &str = "state.lock";

/// Default bound on the number of remembered documents.
pub const DEFAULT_MAX_ENTRIES: usize = 5000;

/// Durable per-URL view state, one JSON file per profile directory.
#[derive(Debug, Clone)]
pub struct ViewStateStore {
    state_path: PathBuf,
    lock_path: PathBuf,
    max_entries: usize,
}

impl ViewStateStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            state_path: data_dir.join(STATE_FILE),
            lock_path: data_dir.join(LOCK_FILE),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Caps the number of stored records; 0 means unbounded.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn path(&self) -> &Path {
        &self.state_path
    }

    /// Returns the saved state for `url`, or the defaults.
    ///
    /// Never fails: a missing, unreadable or malformed store or entry is
    /// logged and treated as absent.
    pub fn load(&self, url: &str) -> ViewState {
        let data = match self.read_data() {
            Ok(data) => data,
            Err(e) => {
                warn!("Ignoring unreadable state store {}: {}", self.state_path.display(), e);
                return ViewState::default();
            }
        };

        let key = state_key(url);
        match data.entries.get(&key) {
            Some(raw) => match decode_entry(&key, raw) {
                Ok(stored) => {
                    debug!("Loaded view state for {}", url);
                    stored.state
                }
                Err(e) => {
                    warn!("{}", e);
                    ViewState::default()
                }
            },
            None => ViewState::default(),
        }
    }

    /// Replaces the whole record for `url`.
    pub fn save(&self, url: &str, state: &ViewState) -> Result<()> {
        self.save_at(url, state, Utc::now())
    }

    fn save_at(&self, url: &str, state: &ViewState, updated_at: DateTime<Utc>) -> Result<()> {
        let entry = StoredState {
            url: url.to_string(),
            state: state.clone(),
            updated_at,
        };
        let raw = serde_json::to_value(&entry).context("Failed to serialize view state")?;

        self.modify(|data| {
            data.entries.insert(state_key(url), raw);
            if self.max_entries > 0 {
                evict_oldest(data, self.max_entries);
            }
        })?;

        debug!("Saved view state for {}", url);
        Ok(())
    }

    /// Forgets `url`. Returns whether a record existed.
    pub fn remove(&self, url: &str) -> Result<bool> {
        let mut existed = false;
        self.modify(|data| {
            existed = data.entries.remove(&state_key(url)).is_some();
        })?;
        Ok(existed)
    }

    /// All readable records, most recently updated first.
    pub fn list(&self) -> Result<Vec<StoredState>> {
        let data = self.read_data()?;
        let mut entries: Vec<StoredState> = data
            .entries
            .iter()
            .filter_map(|(key, raw)| match decode_entry(key, raw) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    /// Keeps the `keep` most recently updated records. Returns how many were dropped.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let mut removed = 0;
        self.modify(|data| {
            removed = evict_oldest(data, keep);
        })?;
        Ok(removed)
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StateData),
    {
        let _lock = FileLock::acquire(open_lock_file(&self.lock_path)?)?;

        let mut data = match self.read_data() {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    "Starting a fresh state store, existing one is unreadable ({}): {}",
                    self.state_path.display(),
                    e
                );
                StateData::default()
            }
        };

        f(&mut data);

        let content = serde_json::to_vec_pretty(&data).context("Failed to serialize state store")?;
        AtomicFile::new(&self.state_path)?.write(&content)?;
        Ok(())
    }

    fn read_data(&self) -> std::result::Result<StateData, StateError> {
        let access_error = |message: String| StateError::AccessError {
            path: self.state_path.clone(),
            message,
        };

        let content = AtomicFile::new(&self.state_path)
            .and_then(|file| file.read())
            .map_err(|e| access_error(format!("{:#}", e)))?;

        match content {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(StateData::default()),
        }
    }
}

fn decode_entry(key: &str, raw: &serde_json::Value) -> std::result::Result<StoredState, StateError> {
    StoredState::deserialize(raw).map_err(|e| StateError::MalformedEntry {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Drops the least recently updated entries beyond `keep`.
/// Undecodable entries go first.
fn evict_oldest(data: &mut StateData, keep: usize) -> usize {
    if data.entries.len() <= keep {
        return 0;
    }

    let mut by_age: Vec<(Option<DateTime<Utc>>, String)> = data
        .entries
        .iter()
        .map(|(key, raw)| {
            let updated_at = decode_entry(key, raw).ok().map(|stored| stored.updated_at);
            (updated_at, key.clone())
        })
        .collect();
    by_age.sort();

    let excess = data.entries.len() - keep;
    for (_, key) in by_age.into_iter().take(excess) {
        data.entries.remove(&key);
    }

    info!("Evicted {} stale view state records", excess);
    excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn sample_state() -> ViewState {
        ViewState {
            line_wrapping: Some(true),
            center_view: false,
            chars_hidden: true,
            hide_chars: 24,
            columns_hidden: true,
            hide_columns: 2,
            delimiter: ",".to_string(),
        }
    }

    #[test]
    fn test_unknown_url_loads_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());

        assert_eq!(store.load("https://example.com/never-seen.log"), ViewState::default());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());
        let url = "https://example.com/build.log";

        store.save(url, &sample_state())?;
        assert_eq!(store.load(url), sample_state());

        // Survives a fresh handle on the same directory
        let reopened = ViewStateStore::new(temp_dir.path());
        assert_eq!(reopened.load(url), sample_state());
        Ok(())
    }

    #[test]
    fn test_save_replaces_whole_record() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());
        let url = "https://example.com/a.txt";

        store.save(url, &sample_state())?;
        store.save(url, &ViewState::default())?;
        assert_eq!(store.load(url), ViewState::default());
        Ok(())
    }

    #[test]
    fn test_records_are_keyed_by_url() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());

        store.save("https://example.com/a.txt", &sample_state())?;
        assert_eq!(store.load("https://example.com/b.txt"), ViewState::default());

        let raw = fs::read_to_string(store.path())?;
        assert!(raw.contains("btv_state_https://example.com/a.txt"));
        Ok(())
    }

    #[test]
    fn test_corrupted_file_loads_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());
        fs::write(store.path(), "{ this is not json")?;

        assert_eq!(store.load("https://example.com/a.txt"), ViewState::default());

        // Saving over a corrupted store starts over
        store.save("https://example.com/a.txt", &sample_state())?;
        assert_eq!(store.load("https://example.com/a.txt"), sample_state());
        Ok(())
    }

    #[test]
    fn test_malformed_entry_is_treated_as_absent() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());
        store.save("https://example.com/good.txt", &sample_state())?;

        let mut data: StateData = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        data.entries.insert(
            state_key("https://example.com/bad.txt"),
            serde_json::json!({ "url": 42, "state": "nope" }),
        );
        fs::write(store.path(), serde_json::to_string(&data)?)?;

        assert_eq!(store.load("https://example.com/bad.txt"), ViewState::default());
        assert_eq!(store.load("https://example.com/good.txt"), sample_state());
        assert_eq!(store.list()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_remove() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path());
        let url = "https://example.com/a.txt";

        store.save(url, &sample_state())?;
        assert!(store.remove(url)?);
        assert!(!store.remove(url)?);
        assert_eq!(store.load(url), ViewState::default());
        Ok(())
    }

    #[test]
    fn test_retention_evicts_least_recently_updated() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path()).with_max_entries(2);
        let start = Utc::now();

        store.save_at("https://example.com/1", &sample_state(), start)?;
        store.save_at("https://example.com/2", &sample_state(), start + Duration::seconds(1))?;
        // Touching 1 again makes 2 the oldest
        store.save_at("https://example.com/1", &sample_state(), start + Duration::seconds(2))?;
        store.save_at("https://example.com/3", &sample_state(), start + Duration::seconds(3))?;

        let urls: Vec<String> = store.list()?.into_iter().map(|s| s.url).collect();
        assert_eq!(urls, vec!["https://example.com/3", "https://example.com/1"]);
        Ok(())
    }

    #[test]
    fn test_prune() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = ViewStateStore::new(temp_dir.path()).with_max_entries(0);
        let start = Utc::now();

        for i in 0..5 {
            store.save_at(&format!("https://example.com/{}", i), &sample_state(), start + Duration::seconds(i))?;
        }

        assert_eq!(store.prune(2)?, 3);
        assert_eq!(store.prune(2)?, 0);
        let urls: Vec<String> = store.list()?.into_iter().map(|s| s.url).collect();
        assert_eq!(urls, vec!["https://example.com/4", "https://example.com/3"]);
        Ok(())
    }
}
