//! UI translations.
//!
//! Translation catalogs are flat YAML key/value maps. The catalogs shipped
//! with the application are embedded at fixed logical names
//! (`translations/<code>.yml`); the language preference may also name a
//! catalog file on disk. Every failure mode (unknown code, missing file,
//! parse error) degrades silently to untranslated keys.

use std::collections::HashMap;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use tracing::debug;

/// Embedded catalogs, keyed by language code.
static CATALOGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en", include_str!("../assets/translations/en.yml")),
        ("de", include_str!("../assets/translations/de.yml")),
    ])
});

/// English fallback entries, always available.
static FALLBACK: Lazy<HashMap<String, String>> =
    Lazy::new(|| parse_catalog(CATALOGS["en"]).unwrap_or_default());

/// Where a resolved language comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// One of the embedded catalogs.
    Embedded(String),
    /// An arbitrary catalog file given by its path.
    File(PathBuf),
}

/// Resolve the language preference value:
/// a known embedded code wins; `"auto"` picks the system locale; anything
/// else is treated as a catalog file path.
pub fn resolve_language(pref: &str) -> LanguageSource {
    if CATALOGS.contains_key(pref) {
        LanguageSource::Embedded(pref.to_string())
    } else if pref == "auto" {
        LanguageSource::Embedded(system_locale())
    } else {
        LanguageSource::File(PathBuf::from(pref))
    }
}

/// Language code of the system locale (`LC_ALL`/`LC_MESSAGES`/`LANG`,
/// truncated to the part before `_` or `.`). Defaults to `"en"`.
fn system_locale() -> String {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(code) = locale_code(&value) {
                return code;
            }
        }
    }
    "en".to_string()
}

fn locale_code(value: &str) -> Option<String> {
    let code: String = value
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    (!code.is_empty() && code != "C").then(|| code.to_lowercase())
}

fn parse_catalog(yaml: &str) -> Result<HashMap<String, String>, String> {
    serde_yaml::from_str(yaml).map_err(|e| e.to_string())
}

/// Resolved translation catalog.
pub struct Translator {
    language: String,
    entries: HashMap<String, String>,
}

impl Translator {
    /// Load the catalog for a language source. Failures fall back to an
    /// empty catalog (so lookups resolve through English or the raw key).
    pub fn load(source: &LanguageSource) -> Self {
        let (language, entries) = match source {
            LanguageSource::Embedded(code) => {
                let entries = CATALOGS
                    .get(code.as_str())
                    .and_then(|yaml| parse_catalog(yaml).ok())
                    .unwrap_or_default();
                (code.clone(), entries)
            }
            LanguageSource::File(path) => {
                let entries = std::fs::read_to_string(path)
                    .ok()
                    .and_then(|yaml| parse_catalog(&yaml).ok())
                    .unwrap_or_default();
                (path.display().to_string(), entries)
            }
        };
        debug!(language, entries = entries.len(), "translation catalog loaded");
        Self { language, entries }
    }

    /// Shortcut: resolve and load from the raw preference value.
    pub fn from_pref(pref: &str) -> Self {
        Self::load(&resolve_language(pref))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate a catalog key. Falls back to English, then to the key
    /// itself.
    pub fn tr(&self, key: &str) -> String {
        self.entries
            .get(key)
            .or_else(|| FALLBACK.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_to_embedded_catalog() {
        assert_eq!(
            resolve_language("de"),
            LanguageSource::Embedded("de".to_string())
        );
    }

    #[test]
    fn unknown_value_is_treated_as_a_file_path() {
        assert_eq!(
            resolve_language("/tmp/custom.yml"),
            LanguageSource::File(PathBuf::from("/tmp/custom.yml"))
        );
    }

    #[test]
    fn locale_code_strips_territory_and_encoding() {
        assert_eq!(locale_code("de_DE.UTF-8"), Some("de".to_string()));
        assert_eq!(locale_code("en"), Some("en".to_string()));
        assert_eq!(locale_code("C"), None);
        assert_eq!(locale_code(""), None);
    }

    #[test]
    fn missing_catalog_file_degrades_to_fallback() {
        let t = Translator::load(&LanguageSource::File(PathBuf::from(
            "/nonexistent/translations.yml",
        )));
        // English fallback still answers for known keys.
        assert_eq!(t.tr("tool.oscilloscope"), "Oscilloscope");
        // Unknown keys come back verbatim.
        assert_eq!(t.tr("tool.time_machine"), "tool.time_machine");
    }

    #[test]
    fn german_catalog_overrides_english() {
        let t = Translator::load(&LanguageSource::Embedded("de".to_string()));
        assert_eq!(t.tr("tool.power_supply"), "Spannungsversorgung");
    }
}
