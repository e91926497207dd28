//! View state machine for one open document.
//!
//! A session keeps the text exactly as received and re-derives what is shown
//! from it on every toggle. Each toggle reloads the stored record, changes
//! its own fields and writes the whole record back.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::config::{FontOverrides, SettingsData};
use crate::state::{ViewState, DEFAULT_HIDE_CHARS, DEFAULT_HIDE_COLUMNS};
use crate::storage::ViewStateStore;
use crate::transform::{self, parse_count, parse_delimiter};

pub const HIDE_CHARS_LABEL: &str = "Hide Chars";
pub const HIDE_COLUMNS_LABEL: &str = "Hide Cols";
pub const SHOW_ALL_LABEL: &str = "Show All";

/// Which transform produced the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShownView {
    Original,
    CharsHidden,
    ColumnsHidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    /// Half width, centred.
    Centered,
    Full,
}

impl Layout {
    pub fn width(self) -> &'static str {
        match self {
            Layout::Centered => "50%",
            Layout::Full => "100%",
        }
    }

    pub fn margin(self) -> &'static str {
        match self {
            Layout::Centered => "0 auto",
            Layout::Full => "0",
        }
    }
}

/// Everything the host needs to draw the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub text: String,
    pub shown: ShownView,
    pub editor_mode: String,
    pub line_wrapping: bool,
    pub layout: Layout,
    pub font: FontOverrides,
    pub hide_chars_label: &'static str,
    pub hide_columns_label: &'static str,
    /// Values to prefill the count and delimiter inputs with.
    pub hide_chars_input: String,
    pub hide_columns_input: String,
    pub delimiter_input: String,
    pub scroll_to_end: bool,
}

pub struct ViewSession<'a> {
    store: &'a ViewStateStore,
    settings: SettingsData,
    url: String,
    editor_mode: String,
    original: String,
    displayed: String,
    shown: ShownView,
    // What this session shows. Other sessions on the same URL may save
    // different values, so these are not read back from the store.
    wrap: bool,
    centered: bool,
    chars_active: bool,
    columns_active: bool,
    state: ViewState,
}

impl<'a> ViewSession<'a> {
    /// Opens `original` with whatever was last saved for `url`.
    ///
    /// With both hide toggles saved as active, the columns view is shown.
    pub fn open(
        store: &'a ViewStateStore,
        settings: SettingsData,
        url: impl Into<String>,
        editor_mode: impl Into<String>,
        original: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let original = original.into();
        let state = store.load(&url);

        let mut session = Self {
            store,
            wrap: state.effective_line_wrapping(settings.do_line_wrap),
            centered: state.center_view,
            chars_active: state.chars_hidden,
            columns_active: state.columns_hidden,
            settings,
            url,
            editor_mode: editor_mode.into(),
            displayed: original.clone(),
            original,
            shown: ShownView::Original,
            state,
        };

        if session.chars_active {
            session.show_chars_hidden(session.state.hide_chars);
        }
        if session.columns_active {
            let delimiter = session.state.delimiter.clone();
            session.show_columns_hidden(session.state.hide_columns, &delimiter);
        }

        debug!("Opened {} as {:?}", session.url, session.shown);
        session
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Record as last written by this session.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn line_wrapping(&self) -> bool {
        self.wrap
    }

    pub fn chars_hidden(&self) -> bool {
        self.chars_active
    }

    pub fn columns_hidden(&self) -> bool {
        self.columns_active
    }

    pub fn toggle_wrap(&mut self) -> Result<bool> {
        let wrap = !self.wrap;
        self.update(|state| state.line_wrapping = Some(wrap))?;
        self.wrap = wrap;
        Ok(wrap)
    }

    pub fn toggle_center(&mut self) -> Result<bool> {
        let centered = !self.centered;
        self.update(|state| state.center_view = centered)?;
        self.centered = centered;
        Ok(centered)
    }

    /// Hides `count_input` leading characters, or shows everything again.
    pub fn toggle_hide_chars(&mut self, count_input: &str) -> Result<()> {
        if self.chars_active {
            self.update(|state| state.chars_hidden = false)?;
            self.chars_active = false;
            self.show_original();
        } else {
            let n = parse_count(count_input);
            self.update(|state| {
                state.chars_hidden = true;
                state.hide_chars = n;
            })?;
            self.chars_active = true;
            self.show_chars_hidden(n);
        }
        Ok(())
    }

    /// Hides `count_input` leading columns split by `delimiter_input`, or shows everything again.
    pub fn toggle_hide_columns(&mut self, count_input: &str, delimiter_input: &str) -> Result<()> {
        if self.columns_active {
            self.update(|state| state.columns_hidden = false)?;
            self.columns_active = false;
            self.show_original();
        } else {
            let n = parse_count(count_input);
            let delimiter = parse_delimiter(delimiter_input);
            self.update(|state| {
                state.columns_hidden = true;
                state.hide_columns = n;
                state.delimiter = delimiter.clone();
            })?;
            self.columns_active = true;
            self.show_columns_hidden(n, &delimiter);
        }
        Ok(())
    }

    /// Remembers an edited count without toggling. Unusable input stores the default.
    pub fn set_hide_chars_input(&mut self, input: &str) -> Result<()> {
        let n = count_or(input, DEFAULT_HIDE_CHARS);
        self.update(|state| state.hide_chars = n)
    }

    pub fn set_hide_columns_input(&mut self, input: &str) -> Result<()> {
        let n = count_or(input, DEFAULT_HIDE_COLUMNS);
        self.update(|state| state.hide_columns = n)
    }

    pub fn set_delimiter_input(&mut self, input: &str) -> Result<()> {
        let delimiter = parse_delimiter(input);
        self.update(|state| state.delimiter = delimiter)
    }

    pub fn render(&self) -> RenderPlan {
        RenderPlan {
            text: self.displayed.clone(),
            shown: self.shown,
            editor_mode: self.editor_mode.clone(),
            line_wrapping: self.wrap,
            layout: if self.centered { Layout::Centered } else { Layout::Full },
            font: self.settings.font_overrides(),
            hide_chars_label: if self.chars_active { SHOW_ALL_LABEL } else { HIDE_CHARS_LABEL },
            hide_columns_label: if self.columns_active { SHOW_ALL_LABEL } else { HIDE_COLUMNS_LABEL },
            hide_chars_input: self.state.hide_chars.to_string(),
            hide_columns_input: self.state.hide_columns.to_string(),
            delimiter_input: transform::display_delimiter(&self.state.delimiter),
            scroll_to_end: true,
        }
    }

    fn show_original(&mut self) {
        self.displayed = self.original.clone();
        self.shown = ShownView::Original;
    }

    fn show_chars_hidden(&mut self, n: usize) {
        self.displayed = transform::hide_chars_text(&self.original, n);
        self.shown = ShownView::CharsHidden;
    }

    fn show_columns_hidden(&mut self, n: usize, delimiter: &str) {
        self.displayed = transform::hide_columns_text(&self.original, n, delimiter);
        self.shown = ShownView::ColumnsHidden;
    }

    /// Load, mutate, save. The fresh load keeps fields written by other
    /// sessions on the same URL.
    fn update<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut ViewState),
    {
        let mut state = self.store.load(&self.url);
        mutate(&mut state);
        self.store.save(&self.url, &state)?;
        self.state = state;
        Ok(())
    }
}

fn count_or(input: &str, fallback: usize) -> usize {
    match parse_count(input) {
        0 => fallback,
        n => n,
    }
}
