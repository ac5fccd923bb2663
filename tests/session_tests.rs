//! Session files written from a notebook and read back as tab specs.

mod common;

use common::RecordingCore;
use termit::session::{capture_session, load_session_from, save_session_to, tab_spec};

#[test]
fn test_saved_session_reopens_same_tabs() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("sessions").join("work");

    let mut core = RecordingCore::with_tabs(3);
    core.notebook.set_tab_label(1, "build");
    core.notebook
        .tab_mut(2)
        .unwrap()
        .set_encoding("ISO-8859-1")
        .unwrap();
    core.notebook.set_current_page(2);

    save_session_to(&capture_session(&core.notebook), &path).unwrap();
    let state = load_session_from(&path).unwrap().unwrap();

    assert_eq!(state.current_page, 2);
    let specs: Vec<_> = state.tabs.iter().map(tab_spec).collect();
    assert_eq!(specs.len(), 3);
    assert_eq!(specs[0].title.as_deref(), Some("tab0"));
    assert_eq!(specs[1].custom_name.as_deref(), Some("build"));
    assert_eq!(specs[2].encoding.as_deref(), Some("ISO-8859-1"));
    assert_eq!(specs[0].encoding.as_deref(), Some("UTF-8"));
    // Detached tabs have no child, so no directory was recorded
    assert_eq!(specs[0].working_directory, dirs::home_dir());
}

#[test]
fn test_session_file_is_plain_yaml() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("plain.yaml");

    let core = RecordingCore::with_tabs(1);
    save_session_to(&capture_session(&core.notebook), &path).unwrap();

    let yaml = std::fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("title: tab0"));
    assert!(yaml.contains("saved_at:"));
}
