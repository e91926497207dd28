//! Header side of the viewer: remembers each tab's last response headers
//! and answers the renderer's requests.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::config::{Config, SettingsData};
use crate::rating;

pub type TabId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Main-frame response as seen by the header listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInfo {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default)]
    pub response_headers: Vec<Header>,
}

impl ResponseInfo {
    pub fn content_type(&self) -> Option<&str> {
        content_type_of(&self.response_headers)
    }
}

/// MIME type from a Content-Type header, parameters stripped.
pub fn content_type_of(headers: &[Header]) -> Option<&str> {
    headers
        .iter()
        .rev()
        .find(|h| h.name.eq_ignore_ascii_case("content-type"))
        .map(|h| h.value.split(';').next().unwrap_or("").trim())
}

/// Last response headers per open tab.
#[derive(Debug, Default)]
pub struct HeaderCache {
    by_tab: HashMap<TabId, ResponseInfo>,
}

impl HeaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignores responses not tied to a real tab (id <= 0).
    pub fn record(&mut self, info: ResponseInfo) {
        if info.tab_id > 0 {
            self.by_tab.insert(info.tab_id, info);
        }
    }

    pub fn get(&self, tab_id: TabId) -> Option<&ResponseInfo> {
        self.by_tab.get(&tab_id)
    }

    pub fn on_tab_removed(&mut self, tab_id: TabId) {
        if self.by_tab.remove(&tab_id).is_some() {
            debug!("Dropped cached headers for closed tab {}", tab_id);
        }
    }

    pub fn len(&self) -> usize {
        self.by_tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tab.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "camelCase")]
pub enum Request {
    StartListening,
    GetSettings,
    SetNextRatingPromptDate { days: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "camelCase")]
pub enum Response {
    HeadersReceived { headers: Option<ResponseInfo> },
    Settings { settings: SettingsData },
    Ack,
}

pub struct Background {
    headers: HeaderCache,
    config: Config,
}

impl Background {
    pub fn new(config: Config) -> Self {
        Self {
            headers: HeaderCache::new(),
            config,
        }
    }

    pub fn on_headers_received(&mut self, info: ResponseInfo) {
        self.headers.record(info);
    }

    pub fn on_tab_removed(&mut self, tab_id: TabId) {
        self.headers.on_tab_removed(tab_id);
    }

    pub fn headers(&self) -> &HeaderCache {
        &self.headers
    }

    pub fn handle(&mut self, request: Request, sender_tab: Option<TabId>) -> Result<Response> {
        let response = match request {
            Request::StartListening => match sender_tab.filter(|id| *id > 0) {
                Some(tab_id) => Response::HeadersReceived {
                    headers: self.headers.get(tab_id).cloned(),
                },
                None => Response::Ack,
            },
            Request::GetSettings => Response::Settings {
                settings: self.config.data.clone(),
            },
            Request::SetNextRatingPromptDate { days } => {
                rating::set_next_rating_prompt_date(&mut self.config, days, Utc::now())?;
                Response::Ack
            }
        };
        Ok(response)
    }
}
