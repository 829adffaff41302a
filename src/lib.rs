//! Benchdeck crate root: re-exports and module wiring.
//!
//! Benchdeck is the launcher shell of a measurement-bench application built
//! on egui/eframe: a sidebar tool menu with persisted drag ordering,
//! per-device tool filtering, detachable tool windows, and a small startup
//! script language.
//!
//! Module map:
//! - `tools`: the master tool catalog (kinds, ids, icons, label keys)
//! - `filter`: hardware compatibility filtering (`ToolFilter`, `DeviceProfile`)
//! - `settings`: persisted key/value store behind the `SettingsStore` trait
//! - `preferences`: user preferences with change-revision tracking
//! - `events`: bitflag menu event kinds and the subscriber controller
//! - `tool_menu`: the toolkit-agnostic sidebar controller
//! - `i18n`: embedded translation catalogs and language resolution
//! - `theme`: embedded theme and font installation
//! - `script`: startup script loading and parsing
//! - `commands`: the mpsc command channel driving the launcher
//! - `app`: the eframe application and run helpers

pub mod tools;
pub mod filter;
pub mod settings;
pub mod preferences;
pub mod events;
pub mod tool_menu;
pub mod i18n;
pub mod theme;
pub mod script;
pub mod commands;
pub mod app;

// Public re-exports for a compact external API
pub use app::{run_launcher, LaunchOptions, Launcher};
pub use commands::{channel_launcher, LauncherCommand, LauncherSink};
pub use events::{EventFilter, EventKind, MenuEvent, MenuEvents};
pub use filter::{DeviceProfile, ToolFilter};
pub use i18n::{resolve_language, LanguageSource, Translator};
pub use preferences::Preferences;
pub use script::{parse_program, Script, ScriptCommand};
pub use settings::{JsonSettings, MemSettings, SettingsStore, SharedSettings};
pub use tool_menu::{SelectOutcome, ToolMenu, ToolMenuItem};
pub use tools::Tool;
