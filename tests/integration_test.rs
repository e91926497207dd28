use plainview::session::{Layout, ShownView};
use plainview::{ViewState, Viewer};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const URL: &str = "https://ci.example.com/jobs/812/output.log";

const LOG: &str = "\
12:00:01\tbuild\tINFO\tCompiling plainview
12:00:09\tbuild\tINFO\tFinished release
12:00:10\ttest\tERROR\t1 failed";

#[test]
fn test_full_workflow() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let viewer = Viewer::new(temp_dir.path())?;

    let mut session = viewer.open(URL, Some("text/plain"), LOG);
    assert_eq!(session.render().editor_mode, "javascript");
    assert_eq!(session.displayed(), LOG);

    session.toggle_hide_columns("3", "\\t")?;
    session.toggle_center()?;
    session.toggle_wrap()?;

    // A new visit, as after a browser restart
    let viewer = Viewer::new(temp_dir.path())?;
    let session = viewer.open(URL, Some("text/plain"), LOG);
    let plan = session.render();

    assert_eq!(plan.text, "Compiling plainview\nFinished release\n1 failed");
    assert_eq!(plan.shown, ShownView::ColumnsHidden);
    assert_eq!(plan.layout, Layout::Full);
    assert!(plan.line_wrapping);
    Ok(())
}

#[test]
fn test_unseen_url_gets_defaults() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let viewer = Viewer::new(temp_dir.path())?;

    assert_eq!(viewer.store().load("https://example.com/new.txt"), ViewState::default());
    Ok(())
}

#[test]
fn test_save_load_round_trip() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let viewer = Viewer::new(temp_dir.path())?;

    let states = [
        ViewState::default(),
        ViewState {
            line_wrapping: Some(false),
            center_view: false,
            chars_hidden: true,
            hide_chars: 0,
            columns_hidden: false,
            hide_columns: 17,
            delimiter: " | ".to_string(),
        },
        ViewState {
            line_wrapping: Some(true),
            delimiter: String::new(),
            ..ViewState::default()
        },
    ];

    for (i, state) in states.iter().enumerate() {
        let url = format!("https://example.com/{}.txt", i);
        viewer.store().save(&url, state)?;
        assert_eq!(&viewer.store().load(&url), state);
    }
    Ok(())
}

#[test]
fn test_center_toggle_round_trips_through_storage() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let viewer = Viewer::new(temp_dir.path())?;
    let before = viewer.store().load(URL);

    let mut session = viewer.open(URL, None, LOG);
    session.toggle_center()?;
    session.toggle_center()?;

    let after = viewer.store().load(URL);
    assert_eq!(after.center_view, before.center_view);
    assert_eq!(viewer.open(URL, None, LOG).render().layout, Layout::Centered);
    Ok(())
}

#[test]
fn test_corrupted_store_never_blocks_viewing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let viewer = Viewer::new(temp_dir.path())?;
    std::fs::write(viewer.store().path(), "\u{0}\u{1}garbage")?;

    let session = viewer.open(URL, None, LOG);
    assert_eq!(session.displayed(), LOG);
    assert_eq!(session.state(), &ViewState::default());
    Ok(())
}

#[test]
fn test_unparsable_settings_never_block_viewing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("settings.toml"), "do_line_wrap = [")?;

    let viewer = Viewer::new(temp_dir.path())?;
    assert_eq!(viewer.config().data, plainview::config::SettingsData::default());

    let mut session = viewer.open(URL, Some("text/plain"), LOG);
    session.toggle_hide_columns("3", "\\t")?;
    let plan = session.render();
    assert_eq!(plan.shown, ShownView::ColumnsHidden);
    assert_eq!(plan.text, "Compiling plainview\nFinished release\n1 failed");
    Ok(())
}

#[test]
fn test_retention_from_settings() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut viewer = Viewer::new(temp_dir.path())?;
    viewer.config_mut().set("max_state_entries", "3")?;

    let viewer = Viewer::new(temp_dir.path())?;
    for i in 0..6 {
        viewer.store().save(&format!("https://example.com/{}.log", i), &ViewState::default())?;
    }
    assert_eq!(viewer.store().list()?.len(), 3);
    Ok(())
}

#[test]
fn test_new_profile_does_not_prompt_for_rating_yet() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let mut viewer = Viewer::new(temp_dir.path())?;
    assert!(!viewer.should_prompt_rating());

    viewer.answer_rating(plainview::rating::RatingAnswer::Never)?;
    assert!(!Viewer::new(temp_dir.path())?.should_prompt_rating());
    Ok(())
}
