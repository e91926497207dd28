pub mod background;
pub mod classify;
pub mod config;
pub mod error;
pub mod rating;
pub mod session;
pub mod state;
pub mod storage;
pub mod transform;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use classify::Classification;
pub use session::{RenderPlan, ViewSession};
pub use state::ViewState;

/// One browsing profile: its settings and its remembered view state.
#[derive(Debug, Clone)]
pub struct Viewer {
    data_dir: PathBuf,
    config: config::Config,
    store: storage::ViewStateStore,
}

impl Viewer {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let config = config::Config::load_or_create(&data_dir)?;
        let store = storage::ViewStateStore::new(&data_dir)
            .with_max_entries(config.data.max_state_entries);

        Ok(Self { data_dir, config, store })
    }

    /// Profile in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::new(config::settings::default_data_dir()?)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &config::Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut config::Config {
        &mut self.config
    }

    pub fn store(&self) -> &storage::ViewStateStore {
        &self.store
    }

    pub fn classify(&self, url: &str, mime_type: Option<&str>) -> Classification {
        classify::classify(url, mime_type)
    }

    /// Starts a view of `content` fetched from `url`, restoring its saved toggles.
    pub fn open(&self, url: &str, mime_type: Option<&str>, content: impl Into<String>) -> ViewSession<'_> {
        let classification = self.classify(url, mime_type);
        ViewSession::open(
            &self.store,
            self.config.data.clone(),
            url,
            classification.editor_mode,
            content,
        )
    }

    pub fn should_prompt_rating(&self) -> bool {
        rating::should_prompt(&self.config.data, chrono::Utc::now())
    }

    pub fn answer_rating(&mut self, answer: rating::RatingAnswer) -> Result<()> {
        rating::record_answer(&mut self.config, answer, chrono::Utc::now())
    }
}
