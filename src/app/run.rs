//! Top-level entry point for running the launcher as a native window.
//!
//! [`run_launcher`] accepts a command channel receiver plus the objects the
//! bootstrap already prepared (settings store, preferences, translator),
//! wires up the [`Launcher`], and enters the eframe event loop.

use eframe::egui;

use super::Launcher;
use crate::commands::LauncherCommand;
use crate::preferences::Preferences;
use crate::settings::SharedSettings;
use crate::theme::{install_fonts, Theme};
use crate::i18n::Translator;

/// Options controlling how the launcher window is created.
pub struct LaunchOptions {
    pub title: String,
    /// When false the event loop still runs (commands and scripts are
    /// processed) but the window stays hidden.
    pub show_window: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            title: "Benchdeck".to_string(),
            show_window: true,
        }
    }
}

/// Launch the application in a native window.
///
/// The call blocks until the window is closed.
pub fn run_launcher(
    rx: std::sync::mpsc::Receiver<LauncherCommand>,
    settings: SharedSettings,
    prefs: Preferences,
    translator: Translator,
    options: LaunchOptions,
) -> eframe::Result<()> {
    let app = Launcher::new(rx, settings, prefs, translator);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1100.0, 720.0))
        .with_visible(options.show_window);
    if let Some(icon) = app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &options.title,
        opts,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Theme::embedded().apply(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}

/// The application icon, compiled into the binary.
static APP_ICON_SVG: &[u8] = include_bytes!("../../icon.svg");

/// Render the embedded SVG icon to an [`egui::IconData`].
///
/// `None` only if the embedded asset fails to parse or render.
fn app_icon() -> Option<egui::IconData> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(APP_ICON_SVG, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_icon_renders_to_rgba() {
        let icon = app_icon().unwrap();
        assert!(icon.width > 0 && icon.height > 0);
        assert_eq!(icon.rgba.len(), (icon.width * icon.height * 4) as usize);
    }
}
