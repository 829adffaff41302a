//! Integration tests for the JSON settings store on a real filesystem.

use std::path::PathBuf;

use serde_json::json;

use benchdeck::settings::KEY_TOOL_POSITIONS;
use benchdeck::{JsonSettings, SettingsStore};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("benchdeck-settings-{}-{name}", std::process::id()))
}

#[test]
fn flush_creates_parent_directories_and_round_trips() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("nested").join("settings.json");

    let mut store = JsonSettings::load(&path).unwrap();
    assert_eq!(store.get(KEY_TOOL_POSITIONS), None);

    store.set(KEY_TOOL_POSITIONS, json!([2, 0, 1]));
    store.set("Preferences/language", json!("de"));
    store.flush().unwrap();

    let reloaded = JsonSettings::load(&path).unwrap();
    assert_eq!(reloaded.get(KEY_TOOL_POSITIONS), Some(json!([2, 0, 1])));
    assert_eq!(reloaded.get("Preferences/language"), Some(json!("de")));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_loads_as_an_empty_store() {
    let store = JsonSettings::load(temp_dir("missing").join("settings.json")).unwrap();
    assert_eq!(store.get("anything"), None);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = JsonSettings::load(&path).unwrap_err();
    assert!(err.contains("settings.json"));

    std::fs::remove_dir_all(&dir).ok();
}
