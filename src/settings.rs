//! Persisted settings storage.
//!
//! Controllers never touch a process-wide settings singleton; they depend on
//! the [`SettingsStore`] trait instead, shared single-threaded through
//! [`SharedSettings`]. The launcher uses a JSON file store; tests use the
//! in-memory [`MemSettings`] fake.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;

/// Settings key holding the tool-menu display order (array of tool indices).
pub const KEY_TOOL_POSITIONS: &str = "toolMenu/pos";
/// Settings key holding the UI language preference.
pub const KEY_LANGUAGE: &str = "Preferences/language";
/// Settings key for the double-click-to-detach preference.
pub const KEY_DOUBLE_CLICK_TO_DETACH: &str = "Preferences/doubleClickToDetach";
/// Settings key for the native-file-dialogs preference.
pub const KEY_NATIVE_DIALOGS: &str = "Preferences/nativeDialogs";
/// Settings key for the digital-decoders preference.
pub const KEY_USE_DECODERS: &str = "Preferences/useDecoders";

/// Key/value persistence the controllers depend on.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    /// Write pending values to the backing storage.
    fn flush(&mut self) -> Result<(), String>;
}

/// Shared handle to a settings store. All access happens on the UI thread.
pub type SharedSettings = Rc<RefCell<dyn SettingsStore>>;

// ─────────────────────────────────────────────────────────────────────────────
// JsonSettings – file-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// Settings persisted as a single pretty-printed JSON object.
#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonSettings {
    /// Load settings from `path`. A missing file is not an error; it loads
    /// as an empty store and is created on the first flush.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(txt) => {
                serde_json::from_str(&txt).map_err(|e| format!("{}: {e}", path.display()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(format!("{}: {e}", path.display())),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
        }
        let txt = serde_json::to_string_pretty(&self.values).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, txt).map_err(|e| format!("{}: {e}", self.path.display()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MemSettings – in-memory fake for tests
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory settings store. `flush` is a no-op.
#[derive(Default)]
pub struct MemSettings {
    values: BTreeMap<String, Value>,
}

impl SettingsStore for MemSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), String> {
        Ok(())
    }
}

/// Wrap a concrete store into the shared handle used by the controllers.
pub fn shared<S: SettingsStore + 'static>(store: S) -> SharedSettings {
    Rc::new(RefCell::new(store))
}

/// The default settings file location: `$XDG_CONFIG_HOME/benchdeck/settings.json`
/// (falling back to `~/.config`).
pub fn default_settings_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("benchdeck").join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mem_settings_get_set() {
        let mut s = MemSettings::default();
        assert_eq!(s.get(KEY_LANGUAGE), None);
        s.set(KEY_LANGUAGE, json!("de"));
        assert_eq!(s.get(KEY_LANGUAGE), Some(json!("de")));
        assert!(s.flush().is_ok());
    }

    #[test]
    fn shared_handle_allows_two_borrowers() {
        let store = shared(MemSettings::default());
        store.borrow_mut().set("a", json!(1));
        let other = store.clone();
        assert_eq!(other.borrow().get("a"), Some(json!(1)));
    }
}
