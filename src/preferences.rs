//! User preferences backed by the settings store.
//!
//! The original design routed preference changes through a notify signal;
//! here interested controllers poll [`Preferences::revision`] once per frame
//! and re-read when it advances.

use serde_json::{json, Value};
use tracing::warn;

use crate::settings::{
    SharedSettings, KEY_DOUBLE_CLICK_TO_DETACH, KEY_LANGUAGE, KEY_NATIVE_DIALOGS, KEY_USE_DECODERS,
};

pub struct Preferences {
    settings: SharedSettings,
    language: String,
    double_click_to_detach: bool,
    native_dialogs: bool,
    use_decoders: bool,
    revision: u64,
}

fn bool_value(v: Option<Value>, default: bool) -> bool {
    v.and_then(|v| v.as_bool()).unwrap_or(default)
}

impl Preferences {
    /// Read all preference values from the settings store.
    pub fn load(settings: SharedSettings) -> Self {
        let (language, double_click_to_detach, native_dialogs, use_decoders) = {
            let store = settings.borrow();
            (
                store
                    .get(KEY_LANGUAGE)
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "auto".to_string()),
                bool_value(store.get(KEY_DOUBLE_CLICK_TO_DETACH), false),
                bool_value(store.get(KEY_NATIVE_DIALOGS), true),
                bool_value(store.get(KEY_USE_DECODERS), true),
            )
        };
        Self {
            settings,
            language,
            double_click_to_detach,
            native_dialogs,
            use_decoders,
            revision: 0,
        }
    }

    /// Monotonic change counter. Advances on every setter call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn double_click_to_detach(&self) -> bool {
        self.double_click_to_detach
    }

    pub fn native_dialogs(&self) -> bool {
        self.native_dialogs
    }

    pub fn use_decoders(&self) -> bool {
        self.use_decoders
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        self.store(KEY_LANGUAGE, json!(self.language.clone()));
    }

    pub fn set_double_click_to_detach(&mut self, on: bool) {
        self.double_click_to_detach = on;
        self.store(KEY_DOUBLE_CLICK_TO_DETACH, json!(on));
    }

    pub fn set_native_dialogs(&mut self, on: bool) {
        self.native_dialogs = on;
        self.store(KEY_NATIVE_DIALOGS, json!(on));
    }

    pub fn set_use_decoders(&mut self, on: bool) {
        self.use_decoders = on;
        self.store(KEY_USE_DECODERS, json!(on));
    }

    /// Session-only override for the command-line flag; not written back to
    /// the store.
    pub fn override_use_decoders(&mut self, on: bool) {
        self.use_decoders = on;
    }

    /// Session-only override for the command-line flag; not written back to
    /// the store.
    pub fn override_native_dialogs(&mut self, on: bool) {
        self.native_dialogs = on;
    }

    fn store(&mut self, key: &str, value: Value) {
        self.revision += 1;
        let mut store = self.settings.borrow_mut();
        store.set(key, value);
        if let Err(e) = store.flush() {
            warn!("failed to persist preferences: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{shared, MemSettings};

    #[test]
    fn defaults_when_store_is_empty() {
        let prefs = Preferences::load(shared(MemSettings::default()));
        assert_eq!(prefs.language(), "auto");
        assert!(!prefs.double_click_to_detach());
        assert!(prefs.native_dialogs());
        assert!(prefs.use_decoders());
    }

    #[test]
    fn setters_advance_the_revision_and_persist() {
        let store = shared(MemSettings::default());
        let mut prefs = Preferences::load(store.clone());
        let r0 = prefs.revision();
        prefs.set_double_click_to_detach(true);
        assert!(prefs.revision() > r0);

        // A fresh load sees the stored value.
        let reloaded = Preferences::load(store);
        assert!(reloaded.double_click_to_detach());
    }

    #[test]
    fn language_round_trip() {
        let store = shared(MemSettings::default());
        let mut prefs = Preferences::load(store.clone());
        prefs.set_language("de");
        assert_eq!(Preferences::load(store).language(), "de");
    }
}
